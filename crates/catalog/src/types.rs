//! Core domain types for the course catalog.
//!
//! Field names on the wire follow the document store layout
//! (`Title`, `Category`, `Sub_Category`, `Skills`), while the Rust side uses
//! snake_case. Only `Title` is required; the other course fields default to
//! empty strings so that a sparse document still decodes and simply
//! contributes nothing to scoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Users are identified by their email address
pub type Email = String;

/// Course titles double as catalog keys
pub type CourseTitle = String;

// =============================================================================
// Learning styles
// =============================================================================

/// Wildcard learning style; also the fallback preferred category
pub const GENERAL_CATEGORY: &str = "General";

/// The fixed category vocabulary used for progress summaries
pub const LEARNING_STYLES: [&str; 4] = ["Visual", "Auditory", "Kinesthetic", GENERAL_CATEGORY];

// =============================================================================
// Course
// =============================================================================

/// A course in the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "Title")]
    pub title: CourseTitle,
    /// Learning style, one of [`LEARNING_STYLES`] in practice
    #[serde(rename = "Category", default)]
    pub category: String,
    /// Domain tag, e.g. "Data Analysis"
    #[serde(rename = "Sub_Category", default)]
    pub sub_category: String,
    /// Comma-separated skill list
    #[serde(rename = "Skills", default)]
    pub skills: String,
}

impl CourseRecord {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        sub_category: impl Into<String>,
        skills: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            sub_category: sub_category.into(),
            skills: skills.into(),
        }
    }
}

// =============================================================================
// Enrollment
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrollmentStatus {
    #[default]
    InProgress,
    Completed,
}

/// A user's association with one course.
///
/// The course fields are copied in at enrollment time, so the record stays
/// meaningful even if the catalog entry later changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    #[serde(rename = "Title")]
    pub title: CourseTitle,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Skills", default)]
    pub skills: String,
    /// Percentage, 0..=100
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub status: EnrollmentStatus,
    /// Only present once the course is completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_link: Option<String>,
}

impl EnrollmentRecord {
    /// Start a fresh enrollment for `course`
    pub fn from_course(course: &CourseRecord) -> Self {
        Self {
            title: course.title.clone(),
            category: course.category.clone(),
            skills: course.skills.clone(),
            progress: 0,
            status: EnrollmentStatus::InProgress,
            certificate_link: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == EnrollmentStatus::Completed
    }
}

// =============================================================================
// User profile
// =============================================================================

/// A registered user and their enrollment history.
///
/// `password_hash` is opaque: it is produced and checked by whatever
/// credential hasher the service is configured with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: Email,
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub username: String,
    /// Insertion order is preserved; at most one entry per title
    #[serde(default)]
    pub enrolled_courses: Vec<EnrollmentRecord>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            username: username.into(),
            enrolled_courses: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn enrollment(&self, title: &str) -> Option<&EnrollmentRecord> {
        self.enrolled_courses.iter().find(|e| e.title == title)
    }

    pub fn enrollment_mut(&mut self, title: &str) -> Option<&mut EnrollmentRecord> {
        self.enrolled_courses.iter_mut().find(|e| e.title == title)
    }

    /// Count enrollments per learning style.
    ///
    /// Every style in [`LEARNING_STYLES`] is present in the result, even with
    /// a zero count. Categories outside the vocabulary are counted too.
    pub fn style_counts(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = LEARNING_STYLES
            .iter()
            .map(|style| (style.to_string(), 0))
            .collect();
        for enrollment in &self.enrolled_courses {
            if enrollment.category.is_empty() {
                continue;
            }
            *counts.entry(enrollment.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}

// =============================================================================
// Search
// =============================================================================

/// Parameters for a paged title search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring of the title; empty matches everything
    #[serde(default)]
    pub query: String,
    /// Restrict to these categories; empty means no restriction
    #[serde(default)]
    pub categories: Vec<String>,
    /// 1-based page number
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub courses: Vec<CourseRecord>,
    pub total_pages: usize,
    pub current_page: usize,
}
