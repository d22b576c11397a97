// crates/geoalias-core/src/fuzzy.rs

//! Approximate alias ranking.
//!
//! Scores are normalized Levenshtein similarity over [`fold_key`]-folded
//! strings, so comparison is case- and diacritic-insensitive. Ranking is
//! deterministic for identical inputs: ordering is stable and ties keep
//! their original scan order.

use crate::text::fold_key;
use std::cmp::Ordering;

/// Ranks `candidates` against `query`, best first.
///
/// Returns `(index, score)` pairs into the candidate slice; indices rather
/// than strings because the pool may contain duplicates. Scores are in
/// `0.0..=1.0`.
pub fn rank(query: &str, candidates: &[&str]) -> Vec<(usize, f64)> {
    let folded = fold_key(query);
    let mut scored: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            (
                i,
                strsim::normalized_levenshtein(&folded, &fold_key(candidate)),
            )
        })
        .collect();
    // sort_by is stable, so equal scores keep scan order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored
}

/// The single best candidate, or `None` for an empty pool.
///
/// When several candidates reach the maximum score, the first one in scan
/// order wins.
pub fn best_match<'a>(query: &str, candidates: &[&'a str]) -> Option<&'a str> {
    rank(query, candidates).first().map(|&(i, _)| candidates[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_closest_candidate_first() {
        let candidates = ["Germany", "Netherlands", "Norway"];
        let ranked = rank("netherlandz", &candidates);
        assert_eq!(ranked[0].0, 1);
        assert!(ranked[0].1 > ranked[1].1);
    }

    #[test]
    fn exact_match_scores_one() {
        let candidates = ["Netherlands"];
        let ranked = rank("netherlands", &candidates);
        assert_eq!(ranked[0].1, 1.0);
    }

    #[test]
    fn folding_is_diacritic_insensitive() {
        let candidates = ["Curaçao"];
        assert_eq!(rank("curacao", &candidates)[0].1, 1.0);
    }

    #[test]
    fn ties_keep_scan_order() {
        // duplicates score identically; the first occurrence must win
        let candidates = ["Holland", "Holland"];
        assert_eq!(rank("holand", &candidates)[0].0, 0);
        assert_eq!(best_match("holand", &candidates), Some("Holland"));
    }

    #[test]
    fn empty_pool_has_no_best_match() {
        assert_eq!(best_match("netherlands", &[]), None);
    }
}
