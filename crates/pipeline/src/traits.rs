//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use anyhow::Result;
use sources::{Candidate, LearnerProfile};

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets a scorer be moved onto a blocking worker thread
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec
/// - Filters must keep the relative order of the candidates they retain,
///   since ranking breaks ties by that order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `profile` - What we know about the learner
    fn apply(&self, candidates: Vec<Candidate>, profile: &LearnerProfile) -> Result<Vec<Candidate>>;
}
