//! Content Source - keyword and category relevance
//!
//! Scores catalog courses against a learner's demonstrated interests:
//! "You took courses about X in style Y, here are more like them"
//!
//! ## Algorithm
//! For every catalog course:
//! 1. +`category_bonus` if its category equals the learner's preferred category
//! 2. +`keyword_weight` for every keyword it shares with the learner
//!
//! Candidates come back in catalog order with their scores; excluding
//! enrolled courses and ranking is the pipeline's job.

use crate::keywords::Keywords;
use crate::types::{Candidate, CandidateSource, LearnerProfile};
use catalog::CourseRecord;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Default bonus for matching the preferred category
pub const DEFAULT_CATEGORY_BONUS: u32 = 3;

/// Default points per shared keyword
pub const DEFAULT_KEYWORD_WEIGHT: u32 = 2;

/// Content source generates candidates by keyword overlap and category affinity
#[derive(Debug, Clone)]
pub struct ContentSource {
    /// Added when the candidate's category is the preferred one
    category_bonus: u32,

    /// Added per keyword shared with the learner
    keyword_weight: u32,
}

impl ContentSource {
    /// Create a new Content source with the default weights
    pub fn new() -> Self {
        Self {
            category_bonus: DEFAULT_CATEGORY_BONUS,
            keyword_weight: DEFAULT_KEYWORD_WEIGHT,
        }
    }

    /// Configure the category bonus (default: 3)
    pub fn with_category_bonus(mut self, bonus: u32) -> Self {
        self.category_bonus = bonus;
        self
    }

    /// Configure the per-keyword weight (default: 2)
    pub fn with_keyword_weight(mut self, weight: u32) -> Self {
        self.keyword_weight = weight;
        self
    }

    /// Score every catalog course for a learner.
    ///
    /// The output has one candidate per catalog entry, in catalog order.
    /// `par_iter` + `collect` preserves that order, so the result is
    /// deterministic regardless of thread scheduling.
    #[instrument(skip(self, profile, catalog), fields(catalog_size = catalog.len()))]
    pub fn get_candidates(&self, profile: &LearnerProfile, catalog: &[CourseRecord]) -> Vec<Candidate> {
        debug!(
            "Scoring catalog against {} learner keywords (preferred category: {})",
            profile.keywords.len(),
            profile.preferred_category
        );

        let candidates: Vec<Candidate> = catalog
            .par_iter()
            .enumerate()
            .map(|(position, course)| self.score_course(position, course, profile))
            .collect();

        debug!("Generated {} content candidates", candidates.len());
        candidates
    }

    /// Score a single course
    pub fn score_course(&self, position: usize, course: &CourseRecord, profile: &LearnerProfile) -> Candidate {
        let category_match = !course.category.is_empty() && course.category == profile.preferred_category;

        let shared_keywords: Vec<String> = course
            .keywords()
            .intersection(&profile.keywords)
            .cloned()
            .collect();

        let mut score = self.keyword_weight * shared_keywords.len() as u32;
        if category_match {
            score += self.category_bonus;
        }

        let mut candidate = Candidate::new(position, course.title.clone(), CandidateSource::Content, score);
        candidate.metadata.category_match = category_match;
        candidate.metadata.shared_keywords = shared_keywords;
        candidate
    }
}

impl Default for ContentSource {
    fn default() -> Self {
        Self::new()
    }
}
