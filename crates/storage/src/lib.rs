//! Storage layer: SQLite schemas and helpers.
//!
//! Holds DB pool setup, the migration runner and the row models for the
//! question store.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::debug;

pub mod models;

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    if !database_url.starts_with("sqlite:") {
        if let Some(parent) = std::path::Path::new(database_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
    let url = normalize_url(database_url);
    let mut opts = SqlitePoolOptions::new();
    if url.contains("memory") {
        opts = opts.max_connections(1);
    } else {
        opts = opts.max_connections(5);
    }
    debug!(url = %url, "connecting to question store");
    let pool = opts.connect(&url).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    // Applies SQLx migrations located in crates/storage/migrations.
    // Safe to run multiple times (idempotent).
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Turns a plain file path into a sqlite URL; URLs pass through unchanged.
/// Plain paths get `mode=rwc` so a missing database file is created.
pub fn normalize_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        return database_url.to_string();
    }
    let path = std::path::PathBuf::from(database_url);
    let norm = path.to_string_lossy().replace('\\', "/");
    if path.is_absolute() {
        format!("sqlite:///{}?mode=rwc", norm.trim_start_matches('/'))
    } else {
        format!("sqlite://{}?mode=rwc", norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_pass_through() {
        let url = "sqlite://file:qa?mode=memory&cache=shared";
        assert_eq!(normalize_url(url), url);
    }

    #[test]
    fn relative_paths_become_urls() {
        assert_eq!(normalize_url("data/qa.db"), "sqlite://data/qa.db?mode=rwc");
    }

    #[test]
    fn absolute_paths_become_urls() {
        assert_eq!(normalize_url("/var/lib/qa.db"), "sqlite:///var/lib/qa.db?mode=rwc");
    }

    #[tokio::test]
    async fn migrations_apply_twice() {
        let pool = connect("sqlite://file:storage_migrate?mode=memory&cache=shared")
            .await
            .unwrap();
        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
