//! Keyword extraction shared by enrolled and candidate courses.
//!
//! A course's keyword set is the union of:
//! - title words: whitespace-split, lowercased, longer than three characters,
//!   not a stop word
//! - skill words: comma-split, then whitespace-split, lowercased, trimmed,
//!   longer than three characters
//!
//! Length is counted in characters, not bytes.

use catalog::{CourseRecord, EnrollmentRecord};
use std::collections::BTreeSet;

/// Title words that carry no topical signal
pub const STOP_WORDS: [&str; 9] = [
    "with",
    "and",
    "the",
    "to",
    "for",
    "in",
    "of",
    "on",
    "introduction",
];

/// Tokens must be strictly longer than this many characters
pub const MIN_KEYWORD_LEN: usize = 3;

/// Normalized keyword set. Ordered so that anything derived from it
/// (shared keyword lists, explanations) is deterministic.
pub type KeywordSet = BTreeSet<String>;

fn long_enough(token: &str) -> bool {
    token.chars().count() > MIN_KEYWORD_LEN
}

/// Keywords contributed by a course title
pub fn title_keywords(title: &str) -> impl Iterator<Item = String> + '_ {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| long_enough(word) && !STOP_WORDS.contains(&word.as_str()))
}

/// Keywords contributed by a comma-separated skill list
pub fn skill_keywords(skills: &str) -> impl Iterator<Item = String> + '_ {
    skills
        .split(',')
        .flat_map(str::split_whitespace)
        .map(|word| word.trim().to_lowercase())
        .filter(|word| long_enough(word))
}

/// Extract the keyword set for a title/skills pair
pub fn extract_keywords(title: &str, skills: &str) -> KeywordSet {
    title_keywords(title).chain(skill_keywords(skills)).collect()
}

/// Anything that carries a title and a skill list
pub trait Keywords {
    fn keywords(&self) -> KeywordSet;
}

impl Keywords for CourseRecord {
    fn keywords(&self) -> KeywordSet {
        extract_keywords(&self.title, &self.skills)
    }
}

impl Keywords for EnrollmentRecord {
    fn keywords(&self) -> KeywordSet {
        extract_keywords(&self.title, &self.skills)
    }
}
