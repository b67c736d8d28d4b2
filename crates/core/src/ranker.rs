use crate::vectorizer::{SparseVector, TermWeightMatrix};

pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub index: usize,
    pub score: f64,
}

/// Cosine similarity; zero vectors score 0.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Similarity of every row to `target`, with the target's own entry forced
/// to 0. `None` when `target` is out of range.
pub fn similarities(matrix: &TermWeightMatrix, target: usize) -> Option<Vec<f64>> {
    let target_row = matrix.row(target)?;
    let mut sims: Vec<f64> = matrix
        .rows()
        .iter()
        .map(|row| cosine(target_row, row))
        .collect();
    sims[target] = 0.0;
    Some(sims)
}

/// Up to `k` rows other than `target`, by descending similarity. Equal
/// scores keep ascending row order.
pub fn rank_scored(matrix: &TermWeightMatrix, target: usize, k: usize) -> Vec<Ranked> {
    let Some(sims) = similarities(matrix, target) else {
        return Vec::new();
    };
    let mut candidates: Vec<Ranked> = sims
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| *idx != target)
        .map(|(index, score)| Ranked { index, score })
        .collect();
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    candidates.truncate(k);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::TfidfVectorizer;

    fn matrix(docs: &[&str]) -> TermWeightMatrix {
        TfidfVectorizer::default().fit_transform(docs).0
    }

    fn rank(matrix: &TermWeightMatrix, target: usize, k: usize) -> Vec<usize> {
        rank_scored(matrix, target, k)
            .into_iter()
            .map(|r| r.index)
            .collect()
    }

    #[test]
    fn most_similar_first() {
        let m = matrix(&[
            "tokio runtime spawn task",
            "pizza dough recipe",
            "tokio spawn blocking task",
            "tokio channel",
        ]);
        assert_eq!(rank(&m, 0, 5), vec![2, 3, 1]);
    }

    #[test]
    fn target_is_excluded_even_when_everything_scores_zero() {
        let m = matrix(&["alpha", "beta", "gamma"]);
        assert_eq!(rank(&m, 1, 5), vec![0, 2]);
    }

    #[test]
    fn self_similarity_is_forced_to_zero() {
        let m = matrix(&["rust async", "rust async"]);
        let sims = similarities(&m, 0).unwrap();
        assert_eq!(sims[0], 0.0);
        assert!((sims[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn k_limits_results() {
        let m = matrix(&["a1 b1", "a1 c1", "a1 d1", "a1 e1"]);
        assert_eq!(rank(&m, 0, 2).len(), 2);
        assert!(rank(&m, 0, 0).is_empty());
        assert_eq!(rank(&m, 0, 100).len(), 3);
    }

    #[test]
    fn out_of_range_target_is_empty() {
        let m = matrix(&["one doc"]);
        assert!(rank(&m, 3, 5).is_empty());
        assert!(similarities(&m, 3).is_none());
        let empty = TermWeightMatrix::default();
        assert!(rank(&empty, 0, 5).is_empty());
    }

    #[test]
    fn ties_are_stable_across_runs() {
        let m = matrix(&["shared x1", "shared y1", "shared z1", "shared w1"]);
        let first = rank_scored(&m, 0, 5);
        assert_eq!(
            first.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        for _ in 0..10 {
            assert_eq!(rank_scored(&m, 0, 5), first);
        }
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let m = matrix(&["rust rust rust", "rust", "go"]);
        for r in rank_scored(&m, 0, 5) {
            assert!((0.0..=1.0).contains(&r.score));
        }
    }
}
