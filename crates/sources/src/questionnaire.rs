//! Questionnaire Source - matching without history
//!
//! Used before a learner has enrolled in anything. There is no relevance
//! scoring here, only filter-and-fill over the catalog:
//!
//! ## Algorithm
//! 1. Up to `primary_limit` courses matching the domain (as sub-category) and
//!    the learning style (as category, "General" meaning any)
//! 2. Top up to `primary_limit` with courses in the learning style but outside
//!    the domain
//! 3. Top up to `minimum_results` with anything else in catalog order
//!
//! Education level and knowledge level are collected but advisory only.

use crate::types::{Candidate, CandidateSource, MatchStage};
use catalog::{CourseRecord, GENERAL_CATEGORY};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Default cap for the first two stages
pub const DEFAULT_PRIMARY_LIMIT: usize = 6;

/// Default floor the fallback stage fills up to
pub const DEFAULT_MINIMUM_RESULTS: usize = 5;

/// Answers to the onboarding questionnaire.
///
/// Empty strings count as unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionnaireAnswers {
    /// High school, undergraduate, postgraduate
    #[serde(default)]
    pub education_level: Option<String>,
    /// Matched against `sub_category`
    #[serde(default)]
    pub domain: Option<String>,
    /// Beginner, intermediate, advanced
    #[serde(default)]
    pub knowledge_level: Option<String>,
    /// Matched against `category`
    #[serde(default)]
    pub learning_style: Option<String>,
}

impl QuestionnaireAnswers {
    pub fn new(domain: Option<&str>, learning_style: Option<&str>) -> Self {
        Self {
            domain: domain.map(str::to_string),
            learning_style: learning_style.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn domain(&self) -> Option<&str> {
        answered(&self.domain)
    }

    pub fn learning_style(&self) -> Option<&str> {
        answered(&self.learning_style)
    }

    /// Learning style as a category filter; "General" filters nothing
    pub fn style_filter(&self) -> Option<&str> {
        self.learning_style().filter(|style| *style != GENERAL_CATEGORY)
    }
}

fn answered(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Questionnaire source selects courses by filtering the catalog
#[derive(Debug, Clone)]
pub struct QuestionnaireSource {
    /// Cap for the domain/style stages
    primary_limit: usize,

    /// The fallback stage fills up to this many
    minimum_results: usize,
}

impl QuestionnaireSource {
    /// Create a new Questionnaire source
    pub fn new() -> Self {
        Self {
            primary_limit: DEFAULT_PRIMARY_LIMIT,
            minimum_results: DEFAULT_MINIMUM_RESULTS,
        }
    }

    /// Configure the domain/style cap (default: 6)
    pub fn with_primary_limit(mut self, limit: usize) -> Self {
        self.primary_limit = limit;
        self
    }

    /// Configure the fallback floor (default: 5)
    pub fn with_minimum_results(mut self, minimum: usize) -> Self {
        self.minimum_results = minimum;
        self
    }

    /// Select candidates in insertion order.
    ///
    /// Titles are unique across all three stages.
    #[instrument(skip(self, answers, catalog), fields(catalog_size = catalog.len()))]
    pub fn get_candidates(&self, answers: &QuestionnaireAnswers, catalog: &[CourseRecord]) -> Vec<Candidate> {
        let domain = answers.domain();
        let mut selection = Selection::default();

        // Stage 1: domain and style
        let style_filter = answers.style_filter();
        selection.extend(
            catalog,
            |course| {
                domain.is_none_or(|d| course.sub_category == d)
                    && style_filter.is_none_or(|s| course.category == s)
            },
            MatchStage::DomainAndStyle,
            self.primary_limit,
        );
        debug!("Domain/style stage selected {}", selection.len());

        // Stage 2: style outside the domain
        if let Some(style) = answers.learning_style() {
            selection.extend(
                catalog,
                |course| course.category == style && domain.is_none_or(|d| course.sub_category != d),
                MatchStage::StyleOnly,
                self.primary_limit,
            );
            debug!("Style stage brought selection to {}", selection.len());
        }

        // Stage 3: anything
        selection.extend(catalog, |_| true, MatchStage::Fallback, self.minimum_results);

        debug!("Generated {} questionnaire candidates", selection.len());
        selection.candidates
    }
}

impl Default for QuestionnaireSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct Selection {
    candidates: Vec<Candidate>,
    titles: HashSet<String>,
}

impl Selection {
    fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Append matching, not yet selected courses until `up_to` are held
    fn extend(
        &mut self,
        catalog: &[CourseRecord],
        matches: impl Fn(&CourseRecord) -> bool,
        stage: MatchStage,
        up_to: usize,
    ) {
        for (position, course) in catalog.iter().enumerate() {
            if self.candidates.len() >= up_to {
                break;
            }
            if !matches(course) || self.titles.contains(&course.title) {
                continue;
            }
            self.titles.insert(course.title.clone());
            let mut candidate = Candidate::new(position, course.title.clone(), CandidateSource::Questionnaire, 0);
            candidate.metadata.match_stage = Some(stage);
            self.candidates.push(candidate);
        }
    }
}
