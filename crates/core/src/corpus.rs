use crate::error::RecommendError;
use crate::models::Question;
use crate::store::QuestionStore;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Documents index-aligned with the question ids they were built from:
/// `documents[i]` always describes `ids[i]`.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    ids: Vec<String>,
    documents: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Corpus {
    pub fn from_questions(questions: &[Question]) -> Self {
        let mut corpus = Corpus::default();
        for (idx, q) in questions.iter().enumerate() {
            corpus.ids.push(q.id.clone());
            corpus.documents.push(q.document());
            // First occurrence wins for duplicate ids.
            corpus.positions.entry(q.id.clone()).or_insert(idx);
        }
        corpus
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn id_at(&self, idx: usize) -> Option<&str> {
        self.ids.get(idx).map(String::as_str)
    }
}

/// Reads the whole store once. No retry and no partial result.
pub async fn load_corpus(
    store: &dyn QuestionStore,
    timeout: Duration,
) -> Result<Corpus, RecommendError> {
    let questions = tokio::time::timeout(timeout, store.fetch_all_questions())
        .await
        .map_err(|_| RecommendError::StoreTimeout(timeout))?
        .map_err(RecommendError::Store)?;
    debug!(questions = questions.len(), "loaded corpus");
    Ok(Corpus::from_questions(&questions))
}
