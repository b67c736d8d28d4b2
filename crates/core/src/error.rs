use std::time::Duration;
use thiserror::Error;

/// Failures of a recommendation request. Cold-start cases (unknown question,
/// empty corpus) are not errors and never show up here.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("question store unavailable: {0:#}")]
    Store(anyhow::Error),
    #[error("question store did not answer within {0:?}")]
    StoreTimeout(Duration),
}
