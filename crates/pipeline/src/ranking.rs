//! Ranking and top-K selection.

use sources::Candidate;
use std::collections::HashSet;

/// Default number of recommendations returned
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Rank candidates by score and keep the first `limit` unique titles.
///
/// The sort is stable, so equal scores keep their input order (catalog
/// order when fed straight from a source). When a title appears more than
/// once, only its best-ranked occurrence survives.
pub fn rank_and_select(mut candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen: HashSet<String> = HashSet::new();
    let mut selected = Vec::with_capacity(limit.min(candidates.len()));
    for candidate in candidates {
        if selected.len() >= limit {
            break;
        }
        if seen.insert(candidate.title.clone()) {
            selected.push(candidate);
        }
    }
    selected
}
