use serde::{Deserialize, Serialize};

/// Snapshot of a stored question. Missing title or description are carried
/// as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Question {
    pub fn new(id: &str, title: &str, description: &str, tags: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Text fed to the vectorizer: title, description and tags joined by
    /// single spaces.
    pub fn document(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.tags.join(" ")
        )
    }
}

/// A recommended question with its cosine similarity to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub score: f64,
}
