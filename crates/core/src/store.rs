//! Question store: the read contract consumed by the recommender and the
//! SQLite implementation behind it.

use crate::models::Question;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use storage::models::{AnswerRow, QuestionRow, QuestionTagRow};
use tracing::{debug, info};

#[async_trait::async_trait]
pub trait QuestionStore: Send + Sync {
    /// Point-in-time snapshot of every question, in store order.
    async fn fetch_all_questions(&self) -> anyhow::Result<Vec<Question>>;
}

/// Fixed set of questions held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    questions: Vec<Question>,
}

impl InMemoryStore {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait::async_trait]
impl QuestionStore for InMemoryStore {
    async fn fetch_all_questions(&self) -> anyhow::Result<Vec<Question>> {
        Ok(self.questions.clone())
    }
}

/// Record shape accepted by `import`. Every field except `id` may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub questions: usize,
    pub answers: usize,
}

#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserts or replaces a question and its tags.
    pub async fn upsert_question(
        &self,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
        tags: &[String],
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO questions (id, title, description, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                title=excluded.title,
                description=excluded.description
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(chrono::Utc::now().timestamp())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM question_tags WHERE question_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for (position, tag) in tags.iter().enumerate() {
            sqlx::query(
                "INSERT OR IGNORE INTO question_tags (question_id, tag, position) VALUES (?1, ?2, ?3)",
            )
            .bind(id)
            .bind(tag)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn insert_answer(&self, question_id: &str, body: &str) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO answers (question_id, body, created_at) VALUES (?1, ?2, ?3)")
            .bind(question_id)
            .bind(body)
            .bind(chrono::Utc::now().timestamp())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn fetch_answers(&self, question_id: &str) -> anyhow::Result<Vec<String>> {
        let rows = sqlx::query_as::<_, AnswerRow>(
            "SELECT id, question_id, body, created_at FROM answers WHERE question_id = ?1 ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.body).collect())
    }

    pub async fn import(&self, records: &[ImportRecord]) -> anyhow::Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        for record in records {
            self.upsert_question(
                &record.id,
                record.title.as_deref(),
                record.description.as_deref(),
                &record.tags,
            )
            .await?;
            summary.questions += 1;
            for answer in &record.answers {
                self.insert_answer(&record.id, answer).await?;
                summary.answers += 1;
            }
        }
        info!(
            questions = summary.questions,
            answers = summary.answers,
            "import complete"
        );
        Ok(summary)
    }
}

#[async_trait::async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn fetch_all_questions(&self) -> anyhow::Result<Vec<Question>> {
        // Both reads share one transaction so tags match the question rows.
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query_as::<_, QuestionRow>(
            "SELECT seq, id, title, description, created_at FROM questions ORDER BY seq",
        )
        .fetch_all(&mut *tx)
        .await?;
        let tag_rows = sqlx::query_as::<_, QuestionTagRow>(
            "SELECT question_id, tag, position FROM question_tags ORDER BY question_id, position",
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let mut tags: HashMap<String, Vec<String>> = HashMap::new();
        for row in tag_rows {
            tags.entry(row.question_id).or_default().push(row.tag);
        }

        let questions: Vec<Question> = rows
            .into_iter()
            .map(|row| Question {
                tags: tags.remove(&row.id).unwrap_or_default(),
                id: row.id,
                title: row.title.unwrap_or_default(),
                description: row.description.unwrap_or_default(),
            })
            .collect();
        debug!(count = questions.len(), "fetched question snapshot");
        Ok(questions)
    }
}
