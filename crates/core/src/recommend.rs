//! Related-question recommendations: load the corpus, vectorize it, rank
//! against the target and map rows back to question ids.
//!
//! Nothing is cached between calls; every request sees the current store.

use crate::config::{RecommendConfig, StoreConfig};
use crate::corpus::load_corpus;
use crate::error::RecommendError;
use crate::models::Recommendation;
use crate::ranker;
use crate::store::QuestionStore;
use crate::tokenizer::{StopWords, Tokenizer};
use crate::vectorizer::TfidfVectorizer;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn QuestionStore>,
    vectorizer: TfidfVectorizer,
    default_top_k: usize,
    store_timeout: Duration,
}

impl Recommender {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self {
            store,
            vectorizer: TfidfVectorizer::default(),
            default_top_k: ranker::DEFAULT_TOP_K,
            store_timeout: StoreConfig::default().timeout(),
        }
    }

    pub fn from_config(
        store: Arc<dyn QuestionStore>,
        recommend: &RecommendConfig,
        store_cfg: &StoreConfig,
    ) -> anyhow::Result<Self> {
        let stop_words = match &recommend.stop_words_path {
            Some(path) => StopWords::from_file(Path::new(path))?,
            None => StopWords::english(),
        };
        Ok(Self {
            store,
            vectorizer: TfidfVectorizer::new(Tokenizer::new(stop_words)),
            default_top_k: recommend.top_k,
            store_timeout: store_cfg.timeout(),
        })
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    pub async fn recommend(
        &self,
        question_id: &str,
        top_k: usize,
    ) -> Result<Vec<String>, RecommendError> {
        Ok(self
            .recommend_scored(question_id, top_k)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect())
    }

    pub async fn recommend_scored(
        &self,
        question_id: &str,
        top_k: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let corpus = load_corpus(self.store.as_ref(), self.store_timeout).await?;
        let Some(target) = corpus.position(question_id) else {
            debug!(question_id, corpus = corpus.len(), "unknown question, nothing to recommend");
            return Ok(Vec::new());
        };

        let (matrix, vocab) = self.vectorizer.fit_transform(corpus.documents());
        // Rank every row, then cut to top_k by distinct id: rows sharing the
        // target's id are skipped and repeated ids keep their best row.
        let ranked = ranker::rank_scored(&matrix, target, corpus.len());
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(question_id);
        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .filter_map(|r| {
                let id = corpus.id_at(r.index)?;
                seen.insert(id).then(|| Recommendation {
                    id: id.to_string(),
                    score: r.score,
                })
            })
            .take(top_k)
            .collect();
        info!(
            question_id,
            corpus = corpus.len(),
            terms = vocab.len(),
            returned = recommendations.len(),
            "recommendations ready"
        );
        Ok(recommendations)
    }
}
