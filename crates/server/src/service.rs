//! # Course Service
//!
//! User-scoped operations over a [`CourseStore`]:
//! - search the catalog
//! - enroll, update progress, submit quizzes, complete courses
//! - summarize progress per learning style
//! - recommend courses from enrollment history or questionnaire answers
//!
//! Callers pass an already verified email (see `AccountService::authenticate`).
//! Scoring is CPU-bound and runs on the blocking pool so that a large
//! catalog never stalls the async executor.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use catalog::{CourseRecord, EnrollmentRecord, EnrollmentStatus, SearchPage, SearchQuery, LEARNING_STYLES};
use pipeline::{RecommendationScorer, ScoredCourse};
use serde::Serialize;
use sources::{CandidateSource, MatchStage, QuestionnaireAnswers};
use tracing::{debug, info, warn};

use crate::config::{Config, QuizThresholds};
use crate::error::{Result, ServiceError};
use crate::store::CourseStore;

/// A recommended course as returned to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub category: String,
    pub sub_category: String,
    pub skills: String,
    pub score: u32,
    pub explanation: String,
}

impl Recommendation {
    fn from_scored(scored: ScoredCourse) -> Self {
        let explanation = explain(&scored);
        let CourseRecord {
            title,
            category,
            sub_category,
            skills,
        } = scored.course;
        Self {
            title,
            category,
            sub_category,
            skills,
            score: scored.score,
            explanation,
        }
    }
}

fn explain(scored: &ScoredCourse) -> String {
    let metadata = &scored.metadata;
    match scored.source {
        CandidateSource::Content => {
            let mut reasons = Vec::new();
            if metadata.category_match {
                reasons.push(format!("matches your preferred style ({})", scored.course.category));
            }
            if !metadata.shared_keywords.is_empty() {
                reasons.push(format!("covers {}", metadata.shared_keywords.join(", ")));
            }
            if reasons.is_empty() {
                "Something new to explore".to_string()
            } else {
                let mut text = reasons.join("; ");
                if let Some(first) = text.get_mut(..1) {
                    first.make_ascii_uppercase();
                }
                text
            }
        }
        CandidateSource::Questionnaire => match metadata.match_stage {
            Some(MatchStage::DomainAndStyle) => "Matches your domain and learning style".to_string(),
            Some(MatchStage::StyleOnly) => "Matches your learning style".to_string(),
            Some(MatchStage::Fallback) | None => "Popular in the catalog".to_string(),
        },
    }
}

/// Result of an enroll request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    Enrolled,
    AlreadyEnrolled,
}

pub struct CourseService<S> {
    store: Arc<S>,
    scorer: RecommendationScorer,
    page_size: usize,
    quiz: QuizThresholds,
}

impl<S: CourseStore> CourseService<S> {
    pub fn new(store: Arc<S>, config: &Config) -> Self {
        Self {
            store,
            scorer: RecommendationScorer::new().with_max_results(config.max_recommendations),
            page_size: config.page_size,
            quiz: config.quiz.clone(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let page = self.store.search(query, self.page_size)?;
        debug!(
            "Search {:?}: page {}/{} with {} courses",
            query.query,
            page.current_page,
            page.total_pages,
            page.courses.len()
        );
        Ok(page)
    }

    /// Enroll the user in a catalog course. Enrolling twice is a no-op.
    pub fn enroll(&self, email: &str, title: &str) -> Result<EnrollOutcome> {
        let course = self
            .store
            .find_course(title)?
            .ok_or_else(|| ServiceError::CourseNotFound(title.to_string()))?;

        let added = self
            .store
            .update_user(email, &mut |user| {
                if user.enrollment(&course.title).is_some() {
                    return false;
                }
                user.enrolled_courses.push(EnrollmentRecord::from_course(&course));
                true
            })?
            .ok_or_else(|| ServiceError::UnknownUser(email.to_string()))?;

        if added {
            info!("{} enrolled in {}", email, course.title);
            Ok(EnrollOutcome::Enrolled)
        } else {
            debug!("{} already enrolled in {}", email, course.title);
            Ok(EnrollOutcome::AlreadyEnrolled)
        }
    }

    /// Enrollment counts per learning style. Unknown users get all zeros.
    pub fn progress_summary(&self, email: &str) -> Result<BTreeMap<String, usize>> {
        Ok(match self.store.find_user(email)? {
            Some(user) => user.style_counts().into_iter().collect(),
            None => LEARNING_STYLES.iter().map(|style| (style.to_string(), 0)).collect(),
        })
    }

    /// Set progress on an enrolled course, clamped to 100. Returns the stored value.
    pub fn update_progress(&self, email: &str, title: &str, progress: u32) -> Result<u8> {
        let progress = progress.min(100) as u8;
        self.set_progress(email, title, progress)?;
        Ok(progress)
    }

    /// Turn a quiz score into progress on the course. Returns the stored value.
    pub fn submit_quiz(&self, email: &str, title: &str, score: u32) -> Result<u8> {
        let progress = self.quiz.progress_for(score);
        self.set_progress(email, title, progress)?;
        info!("{} scored {} on {}, progress now {}", email, score, title, progress);
        Ok(progress)
    }

    fn set_progress(&self, email: &str, title: &str, progress: u8) -> Result<()> {
        let found = self
            .store
            .update_user(email, &mut |user| match user.enrollment_mut(title) {
                Some(enrollment) => {
                    enrollment.progress = progress;
                    true
                }
                None => false,
            })?
            .ok_or_else(|| ServiceError::UnknownUser(email.to_string()))?;

        if !found {
            return Err(ServiceError::EnrollmentNotFound(title.to_string()));
        }
        Ok(())
    }

    /// Mark an in-progress enrollment completed and attach its certificate
    pub fn complete_course(&self, email: &str, title: &str, certificate_link: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(ServiceError::MissingField("title"));
        }
        if certificate_link.trim().is_empty() {
            return Err(ServiceError::MissingField("certificate_link"));
        }

        let mut already_completed = false;
        let found = self
            .store
            .update_user(email, &mut |user| match user.enrollment_mut(title) {
                Some(enrollment) if enrollment.is_completed() => {
                    already_completed = true;
                    false
                }
                Some(enrollment) => {
                    enrollment.status = EnrollmentStatus::Completed;
                    enrollment.certificate_link = Some(certificate_link.to_string());
                    true
                }
                None => false,
            })?
            .ok_or_else(|| ServiceError::UnknownUser(email.to_string()))?;

        if already_completed {
            return Err(ServiceError::AlreadyCompleted(title.to_string()));
        }
        if !found {
            return Err(ServiceError::EnrollmentNotFound(title.to_string()));
        }
        info!("{} completed {}", email, title);
        Ok(())
    }

    /// Recommendations from the user's enrollment history.
    ///
    /// Users with no enrollments (or unknown users) get an empty list.
    pub async fn recommend_for(&self, email: &str) -> Result<Vec<Recommendation>> {
        let start_time = Instant::now();

        let enrolled = self.store.enrollments(email)?;
        let catalog = self.store.catalog()?;
        info!(
            "Scoring {} catalog courses against {} enrollments for {}",
            catalog.len(),
            enrolled.len(),
            email
        );

        let scorer = self.scorer.clone();
        let scored = tokio::task::spawn_blocking(move || scorer.recommend_scored(&enrolled, &catalog))
            .await?
            .map_err(ServiceError::Recommendation)?;

        let recommendations: Vec<Recommendation> = scored.into_iter().map(Recommendation::from_scored).collect();
        info!(
            "Selected {} recommendations for {} in {:.2?}",
            recommendations.len(),
            email,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Recommendations for a new user from onboarding answers
    pub async fn questionnaire_recommend(&self, answers: QuestionnaireAnswers) -> Result<Vec<Recommendation>> {
        if answers.domain().is_none() && answers.learning_style().is_none() {
            warn!("Questionnaire submitted without domain or learning style");
        }
        let catalog = self.store.catalog()?;

        let scorer = self.scorer.clone();
        let scored =
            tokio::task::spawn_blocking(move || scorer.match_by_questionnaire_scored(&answers, &catalog)).await?;

        info!("Questionnaire matched {} courses", scored.len());
        Ok(scored.into_iter().map(Recommendation::from_scored).collect())
    }
}
