//! Provider abstractions for the text-generation models behind tag
//! suggestion, summarization and rephrasing.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub mod noop;
pub mod openai;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("not implemented")]
    NotImplemented,
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

/// Text in, text out. Prompt construction and response parsing live with
/// the callers.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Default, Clone)]
pub struct ProviderRegistry {
    llms: HashMap<String, Arc<dyn LlmProvider>>,
    pub preferred_llm: Option<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_llm(mut self, name: &str, provider: Arc<dyn LlmProvider>) -> Self {
        self.llms.insert(name.to_string(), provider);
        self
    }

    pub fn set_preferred_llm(mut self, name: &str) -> Self {
        self.preferred_llm = Some(name.to_string());
        self
    }

    pub fn llm(&self, name: Option<&str>) -> Result<Arc<dyn LlmProvider>, ProviderError> {
        let key = name
            .map(str::to_string)
            .or_else(|| self.preferred_llm.clone())
            .ok_or_else(|| ProviderError::UnknownProvider("no llm provider configured".into()))?;
        self.llms
            .get(&key)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownProvider(key))
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.llms.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noop::NoopProvider;

    struct Echo;

    #[async_trait::async_trait]
    impl LlmProvider for Echo {
        async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
            Ok(prompt.to_uppercase())
        }
    }

    #[tokio::test]
    async fn preferred_provider_is_used_by_default() {
        let reg = ProviderRegistry::new()
            .with_llm("noop", Arc::new(NoopProvider))
            .with_llm("echo", Arc::new(Echo))
            .set_preferred_llm("echo");
        let llm = reg.llm(None).unwrap();
        assert_eq!(llm.complete("hi").await.unwrap(), "HI");
        assert_eq!(reg.names(), vec!["echo".to_string(), "noop".to_string()]);
    }

    #[test]
    fn missing_provider_is_reported() {
        let reg = ProviderRegistry::new().set_preferred_llm("openai");
        match reg.llm(None) {
            Err(ProviderError::UnknownProvider(name)) => assert_eq!(name, "openai"),
            _ => panic!("expected unknown provider"),
        }
        assert!(matches!(
            ProviderRegistry::new().llm(None),
            Err(ProviderError::UnknownProvider(_))
        ));
    }
}
