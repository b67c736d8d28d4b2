use anyhow::{Context, Result};
use recommender_core::store::{ImportRecord, ImportSummary, SqliteQuestionStore};
use std::path::Path;

/// Reads a JSON array of question records.
pub fn read_records(path: &Path) -> Result<Vec<ImportRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<ImportRecord> = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(records)
}

pub async fn import_file(store: &SqliteQuestionStore, path: &Path) -> Result<ImportSummary> {
    let records = read_records(path)?;
    store.import(&records).await
}
