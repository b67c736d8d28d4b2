//! Lowercasing word tokenizer with English stop-word removal.
//!
//! Tokens are maximal runs of word characters (alphanumerics and `_`) at
//! least two characters long.

use anyhow::Context;
use std::collections::HashSet;
use std::path::Path;

const ENGLISH_STOP_WORDS: &str = include_str!("../stop_words/english.txt");

#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The bundled English list.
    pub fn english() -> Self {
        Self::parse(ENGLISH_STOP_WORDS)
    }

    /// One word per line; blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading stop words from {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stop_words: StopWords,
}

impl Tokenizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|w| w.chars().count() >= 2)
            .filter(|w| !self.stop_words.contains(w))
            .map(str::to_string)
            .collect()
    }
}
