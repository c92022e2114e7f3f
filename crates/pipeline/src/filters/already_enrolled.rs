//! Filter to remove courses the learner is already enrolled in.
//!
//! This is the first filter in the pipeline, as there's no point in
//! recommending a course the learner has already started.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, LearnerProfile};

/// Removes candidates whose title appears in the learner's enrollments.
///
/// ## Algorithm
/// Uses the HashSet in LearnerProfile.enrolled_titles for O(1) lookups.
pub struct AlreadyEnrolledFilter;

impl Filter for AlreadyEnrolledFilter {
    fn name(&self) -> &str {
        "AlreadyEnrolledFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, profile: &LearnerProfile) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !profile.is_enrolled(&candidate.title))
            .collect();
        Ok(filtered)
    }
}
