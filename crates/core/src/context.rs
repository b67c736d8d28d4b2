use crate::config::AppConfig;
use crate::recommend::Recommender;
use crate::store::SqliteQuestionStore;
use anyhow::Context;
use providers::noop::NoopProvider;
use providers::openai::{OpenAiConfig, OpenAiProvider, DEFAULT_BASE_URL};
use providers::ProviderRegistry;
use std::sync::Arc;
use storage::{connect, migrate};
use tracing::{info, warn};

/// Everything a command or request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub store: SqliteQuestionStore,
    pub recommender: Recommender,
    pub registry: ProviderRegistry,
}

impl AppContext {
    pub async fn open(config: AppConfig) -> anyhow::Result<Self> {
        let pool = connect(&config.database.path).await.context("db connect")?;
        migrate(&pool).await.context("db migrate")?;
        let store = SqliteQuestionStore::new(pool);
        let recommender =
            Recommender::from_config(Arc::new(store.clone()), &config.recommend, &config.store)?;
        let registry = build_registry(&config);
        info!(
            database = %config.database.path,
            llm = %config.llm.provider,
            "application context ready"
        );
        Ok(Self {
            config,
            store,
            recommender,
            registry,
        })
    }
}

pub fn build_registry(config: &AppConfig) -> ProviderRegistry {
    registry_from(
        config,
        std::env::var("OPENAI_API_KEY").ok(),
        std::env::var("OPENAI_BASE_URL").ok(),
    )
}

fn registry_from(
    config: &AppConfig,
    api_key: Option<String>,
    base_url_env: Option<String>,
) -> ProviderRegistry {
    let mut reg = ProviderRegistry::new().with_llm("noop", Arc::new(NoopProvider));

    if let Some(key) = api_key {
        let base_url = config
            .llm
            .base_url
            .clone()
            .or(base_url_env)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let provider = OpenAiProvider::new(OpenAiConfig {
            api_key: key,
            base_url,
            chat_model: config.llm.model.clone(),
        });
        reg = reg.with_llm("openai", Arc::new(provider));
    } else if config.llm.provider == "openai" {
        warn!("OPENAI_API_KEY not set; text assistants will be unavailable");
    }

    reg.set_preferred_llm(&config.llm.provider)
}
