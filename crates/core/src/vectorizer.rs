//! TF-IDF vectorization of a corpus into a sparse, row-normalized matrix.
//!
//! Weights are `tf * idf` with raw term counts and the smoothed
//! `idf = ln((1 + n) / (1 + df)) + 1`; every row is scaled to unit L2 norm.

use crate::tokenizer::Tokenizer;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Smoothed inverse document frequency.
pub fn smoothed_idf(n_docs: usize, df: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}

/// Sparse vector of `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(col, _)| *col);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |(c, _)| *c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ca, wa) = self.entries[i];
            let (cb, wb) = other.entries[j];
            match ca.cmp(&cb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in self.entries.iter_mut() {
                *w /= norm;
            }
        }
    }
}

/// Terms sorted lexicographically; a term's position is its matrix column.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
    document_frequency: Vec<usize>,
    idf: Vec<f64>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn document_frequency(&self, term: &str) -> Option<usize> {
        self.column(term).map(|c| self.document_frequency[c])
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|c| self.idf[c])
    }
}

/// One row per document, index-aligned with the input corpus.
#[derive(Debug, Clone, Default)]
pub struct TermWeightMatrix {
    rows: Vec<SparseVector>,
    n_cols: usize,
}

impl TermWeightMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn row(&self, idx: usize) -> Option<&SparseVector> {
        self.rows.get(idx)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
}

impl TfidfVectorizer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> (TermWeightMatrix, Vocabulary) {
        let n_docs = documents.len();
        let counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|d| {
                let mut tf = BTreeMap::new();
                for token in self.tokenizer.tokenize(d.as_ref()) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let mut vocab = Vocabulary::default();
        for (col, (term, freq)) in df.into_iter().enumerate() {
            vocab.index.insert(term.to_string(), col);
            vocab.terms.push(term.to_string());
            vocab.document_frequency.push(freq);
            vocab.idf.push(smoothed_idf(n_docs, freq));
        }

        let rows = counts
            .iter()
            .map(|doc| {
                let entries = doc
                    .iter()
                    .filter_map(|(term, &tf)| {
                        vocab
                            .column(term)
                            .map(|col| (col, tf as f64 * vocab.idf[col]))
                    })
                    .collect();
                let mut row = SparseVector::new(entries);
                row.normalize();
                row
            })
            .collect();

        debug!(documents = n_docs, terms = vocab.len(), "vectorized corpus");
        let matrix = TermWeightMatrix {
            rows,
            n_cols: vocab.len(),
        };
        (matrix, vocab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn idf_matches_smoothed_formula() {
        assert!(approx(smoothed_idf(2, 2), 1.0));
        assert!(approx(smoothed_idf(2, 1), 1.405_465_108_108_164_4));
        assert!(approx(smoothed_idf(3, 1), (4.0f64 / 2.0).ln() + 1.0));
    }

    #[test]
    fn weights_match_reference_values() {
        let v = TfidfVectorizer::default();
        let (m, vocab) = v.fit_transform(&["apple banana", "apple cherry"]);
        assert_eq!(vocab.terms(), &["apple", "banana", "cherry"]);
        assert_eq!(vocab.document_frequency("apple"), Some(2));
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.n_cols(), 3);

        let idf_b = smoothed_idf(2, 1);
        let norm = (1.0 + idf_b * idf_b).sqrt();
        let row0 = m.row(0).unwrap();
        assert!(approx(row0.get(0), 1.0 / norm));
        assert!(approx(row0.get(1), idf_b / norm));
        assert!(approx(row0.get(2), 0.0));
        assert!(approx(row0.norm(), 1.0));
        assert!(approx(row0.dot(m.row(1).unwrap()), 1.0 / (norm * norm)));
    }

    #[test]
    fn repeated_terms_count_raw_frequency() {
        let v = TfidfVectorizer::default();
        let (m, vocab) = v.fit_transform(&["rust rust tokio", "tokio"]);
        let rust = vocab.column("rust").unwrap();
        let tokio = vocab.column("tokio").unwrap();
        let row = m.row(0).unwrap();
        let expected_ratio = 2.0 * smoothed_idf(2, 1) / smoothed_idf(2, 2);
        assert!(approx(row.get(rust) / row.get(tokio), expected_ratio));
    }

    #[test]
    fn empty_corpus_gives_empty_matrix() {
        let v = TfidfVectorizer::default();
        let (m, vocab) = v.fit_transform::<&str>(&[]);
        assert_eq!(m.n_rows(), 0);
        assert!(vocab.is_empty());
    }

    #[test]
    fn stop_word_only_document_is_zero_row() {
        let v = TfidfVectorizer::default();
        let (m, _) = v.fit_transform(&["the of and", "tokio runtime"]);
        assert!(m.row(0).unwrap().is_zero());
        assert_eq!(m.row(0).unwrap().norm(), 0.0);
        assert!(approx(m.row(1).unwrap().norm(), 1.0));
    }

    #[test]
    fn dot_of_disjoint_rows_is_zero() {
        let a = SparseVector::new(vec![(3, 0.5), (0, 0.5)]);
        let b = SparseVector::new(vec![(1, 1.0), (2, 1.0)]);
        assert_eq!(a.entries()[0].0, 0);
        assert_eq!(a.dot(&b), 0.0);
    }
}
