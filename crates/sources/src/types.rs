//! Shared types for candidate generation.

use crate::keywords::KeywordSet;
use catalog::{CourseTitle, GENERAL_CATEGORY};
use std::collections::HashSet;

/// Which source produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Keyword and category scoring against enrollment history
    Content,
    /// Questionnaire filter-and-fill
    Questionnaire,
}

/// How a questionnaire candidate was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStage {
    /// Matched both domain and learning style
    DomainAndStyle,
    /// Matched the learning style outside the requested domain
    StyleOnly,
    /// Catalog fill-up
    Fallback,
}

/// Extra information carried along for explanations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateMetadata {
    pub category_match: bool,
    pub shared_keywords: Vec<String>,
    pub match_stage: Option<MatchStage>,
}

/// A catalog course under consideration.
///
/// `position` is the course's index in the catalog slice it was drawn from;
/// ranking uses it to resolve back to the record and to keep catalog order
/// on ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub position: usize,
    pub title: CourseTitle,
    pub source: CandidateSource,
    pub score: u32,
    pub metadata: CandidateMetadata,
}

impl Candidate {
    pub fn new(position: usize, title: impl Into<String>, source: CandidateSource, score: u32) -> Self {
        Self {
            position,
            title: title.into(),
            source,
            score,
            metadata: CandidateMetadata::default(),
        }
    }
}

/// Everything the content source needs to know about a learner, gathered
/// once from their enrollment history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnerProfile {
    /// Titles the learner is already enrolled in
    pub enrolled_titles: HashSet<CourseTitle>,
    /// Union of the keyword sets of all enrolled courses
    pub keywords: KeywordSet,
    /// Most frequent enrolled category, "General" without history
    pub preferred_category: String,
}

impl LearnerProfile {
    /// Profile of a learner with no history
    pub fn new() -> Self {
        Self {
            enrolled_titles: HashSet::new(),
            keywords: KeywordSet::new(),
            preferred_category: GENERAL_CATEGORY.to_string(),
        }
    }

    pub fn has_history(&self) -> bool {
        !self.enrolled_titles.is_empty()
    }

    pub fn is_enrolled(&self, title: &str) -> bool {
        self.enrolled_titles.contains(title)
    }
}

impl Default for LearnerProfile {
    fn default() -> Self {
        Self::new()
    }
}
