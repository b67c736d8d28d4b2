use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `questions` table. Title and description are nullable so that
/// partially filled records can still be read.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuestionRow {
    pub seq: i64,
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuestionTagRow {
    pub question_id: String,
    pub tag: String,
    pub position: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AnswerRow {
    pub id: i64,
    pub question_id: String,
    pub body: String,
    pub created_at: i64,
}
