//! Helper functions to build a LearnerProfile from enrollment history
//!
//! The profile is gathered once per request so candidate scoring never walks
//! the enrollment list again.

use crate::keywords::{KeywordSet, Keywords};
use crate::types::LearnerProfile;
use catalog::{EnrollmentRecord, GENERAL_CATEGORY};
use std::collections::HashMap;

/// Build a LearnerProfile from a user's enrollments, in stored order.
///
/// Aggregates:
/// - enrolled titles (for exclusion)
/// - the union of keyword sets over all enrollments
/// - the preferred category
pub fn build_learner_profile(enrolled: &[EnrollmentRecord]) -> LearnerProfile {
    let mut profile = LearnerProfile::new();
    if enrolled.is_empty() {
        return profile;
    }

    for enrollment in enrolled {
        profile.enrolled_titles.insert(enrollment.title.clone());
    }
    profile.keywords = collect_keywords(enrolled);
    profile.preferred_category = preferred_category(enrolled);
    profile
}

fn collect_keywords(enrolled: &[EnrollmentRecord]) -> KeywordSet {
    enrolled.iter().flat_map(|e| e.keywords()).collect()
}

/// Most frequent non-empty category among `enrolled`.
///
/// Ties go to the category that appears first in `enrolled`. Falls back to
/// "General" when no enrollment carries a category.
pub fn preferred_category(enrolled: &[EnrollmentRecord]) -> String {
    // category -> (count, first index)
    let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, enrollment) in enrolled.iter().enumerate() {
        if enrollment.category.is_empty() {
            continue;
        }
        stats.entry(enrollment.category.as_str()).or_insert((0, idx)).0 += 1;
    }

    stats
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then_with(|| first_b.cmp(first_a))
        })
        .map(|(category, _)| category.to_string())
        .unwrap_or_else(|| GENERAL_CATEGORY.to_string())
}
