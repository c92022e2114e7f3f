//! # Recommendation Scorer
//!
//! The public face of the recommendation logic. Both entry points are pure
//! functions of their inputs:
//!
//! - `recommend`: enrollment history + catalog → up to 5 ranked courses
//!   1. Build the learner profile
//!   2. Score every catalog course (ContentSource)
//!   3. Drop enrolled courses (FilterPipeline)
//!   4. Rank, dedupe by title, truncate
//! - `match_by_questionnaire`: onboarding answers + catalog → up to 6 courses

use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::{CourseRecord, EnrollmentRecord};
use sources::{
    build_learner_profile, Candidate, CandidateMetadata, CandidateSource, ContentSource,
    QuestionnaireAnswers, QuestionnaireSource,
};
use tracing::debug;

use crate::filter_pipeline::FilterPipeline;
use crate::filters::AlreadyEnrolledFilter;
use crate::ranking::{rank_and_select, DEFAULT_MAX_RESULTS};

/// A selected course together with how it was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCourse {
    pub course: CourseRecord,
    pub score: u32,
    pub source: CandidateSource,
    pub metadata: CandidateMetadata,
}

impl ScoredCourse {
    fn from_candidate(candidate: Candidate, catalog: &[CourseRecord]) -> Option<Self> {
        let course = catalog.get(candidate.position)?.clone();
        Some(Self {
            course,
            score: candidate.score,
            source: candidate.source,
            metadata: candidate.metadata,
        })
    }
}

/// Ranks catalog courses for a learner.
///
/// Cloning is cheap: the filter pipeline is shared behind an `Arc`.
#[derive(Clone)]
pub struct RecommendationScorer {
    content: ContentSource,
    questionnaire: QuestionnaireSource,
    filter_pipeline: Arc<FilterPipeline>,
    max_results: usize,
}

impl RecommendationScorer {
    /// Scorer with the default weights, limits and filters
    pub fn new() -> Self {
        Self {
            content: ContentSource::new(),
            questionnaire: QuestionnaireSource::new(),
            filter_pipeline: Arc::new(FilterPipeline::new().add_filter(AlreadyEnrolledFilter)),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Replace the content source (e.g. with different weights)
    pub fn with_content_source(mut self, content: ContentSource) -> Self {
        self.content = content;
        self
    }

    /// Configure how many recommendations to return (default: 5)
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Ranked recommendations for a learner, with scores.
    ///
    /// Empty history yields an empty list.
    pub fn recommend_scored(
        &self,
        enrolled: &[EnrollmentRecord],
        catalog: &[CourseRecord],
    ) -> Result<Vec<ScoredCourse>> {
        let profile = build_learner_profile(enrolled);
        if !profile.has_history() {
            debug!("No enrollment history, nothing to recommend");
            return Ok(Vec::new());
        }

        let candidates = self.content.get_candidates(&profile, catalog);
        let filtered = self
            .filter_pipeline
            .apply(candidates, &profile)
            .context("Failed to apply filters")?;
        let ranked = rank_and_select(filtered, self.max_results);

        debug!("Selected {} recommendations", ranked.len());
        Ok(ranked
            .into_iter()
            .filter_map(|candidate| ScoredCourse::from_candidate(candidate, catalog))
            .collect())
    }

    /// Ranked recommendations for a learner
    pub fn recommend(&self, enrolled: &[EnrollmentRecord], catalog: &[CourseRecord]) -> Result<Vec<CourseRecord>> {
        Ok(self
            .recommend_scored(enrolled, catalog)?
            .into_iter()
            .map(|scored| scored.course)
            .collect())
    }

    /// Questionnaire matches, with the stage each course came from
    pub fn match_by_questionnaire_scored(
        &self,
        answers: &QuestionnaireAnswers,
        catalog: &[CourseRecord],
    ) -> Vec<ScoredCourse> {
        self.questionnaire
            .get_candidates(answers, catalog)
            .into_iter()
            .filter_map(|candidate| ScoredCourse::from_candidate(candidate, catalog))
            .collect()
    }

    /// Questionnaire matches in selection order
    pub fn match_by_questionnaire(&self, answers: &QuestionnaireAnswers, catalog: &[CourseRecord]) -> Vec<CourseRecord> {
        self.match_by_questionnaire_scored(answers, catalog)
            .into_iter()
            .map(|scored| scored.course)
            .collect()
    }
}

impl Default for RecommendationScorer {
    fn default() -> Self {
        Self::new()
    }
}
