//! Tag suggestion, answer summarization and question rephrasing through the
//! configured text-generation provider.

use providers::{ProviderError, ProviderRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("no answers to summarize")]
    NothingToSummarize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rephrased {
    pub title: String,
    pub description: String,
}

pub fn tags_prompt(text: &str) -> String {
    format!(
        "Suggest 3 to 5 relevant tags (without backticks or the word 'Tags:') for the following StackOverflow-style question:\n\n{}\n\nTags:",
        text
    )
}

pub fn summary_prompt(answers: &[String]) -> String {
    format!(
        "Summarize the following answers like an Amazon review summary:\n\n{}",
        answers.join("\n")
    )
}

pub fn rephrase_prompt(title: &str, description: &str) -> String {
    format!(
        "Rephrase the following question for better clarity. Return it in the format:\nTitle: <...>\nDescription: <...>\n\nOriginal:\nTitle: {}\nDescription: {}",
        title, description
    )
}

/// Comma or newline separated tags, lowercased.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let body = match trimmed.get(..5) {
        Some(head) if head.eq_ignore_ascii_case("tags:") => &trimmed[5..],
        _ => trimmed,
    };
    body.replace('`', "")
        .replace('\n', ",")
        .split(',')
        .map(|t| t.trim().trim_start_matches(['-', '*', '#']).trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn labelled_line<'a>(output: &'a str, label: &str) -> Option<&'a str> {
    let start = output.find(label)? + label.len();
    let rest = output[start..].trim_start();
    let line = rest.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Pulls `Title:` and `Description:` lines out of the model output, keeping
/// the original value for anything missing.
pub fn parse_rephrased(output: &str, title: &str, description: &str) -> Rephrased {
    Rephrased {
        title: labelled_line(output, "Title:").unwrap_or(title).to_string(),
        description: labelled_line(output, "Description:")
            .unwrap_or(description)
            .to_string(),
    }
}

pub async fn suggest_tags(text: &str, registry: &ProviderRegistry) -> Result<Vec<String>, AssistError> {
    let llm = registry.llm(None)?;
    let raw = llm.complete(&tags_prompt(text)).await?;
    let tags = parse_tags(&raw);
    debug!(count = tags.len(), "suggested tags");
    Ok(tags)
}

pub async fn summarize_answers(
    answers: &[String],
    registry: &ProviderRegistry,
) -> Result<String, AssistError> {
    if answers.iter().all(|a| a.trim().is_empty()) {
        return Err(AssistError::NothingToSummarize);
    }
    let llm = registry.llm(None)?;
    let summary = llm.complete(&summary_prompt(answers)).await?;
    Ok(summary.trim().to_string())
}

pub async fn rephrase_question(
    title: &str,
    description: &str,
    registry: &ProviderRegistry,
) -> Result<Rephrased, AssistError> {
    let llm = registry.llm(None)?;
    let output = llm.complete(&rephrase_prompt(title, description)).await?;
    Ok(parse_rephrased(&output, title, description))
}
