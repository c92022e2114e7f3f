//! Runtime configuration.
//!
//! Values come from environment variables. Anything missing or unparsable
//! is logged and replaced by its default, so a bare environment still
//! yields a working service.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use catalog::DEFAULT_PAGE_SIZE;
use pipeline::DEFAULT_MAX_RESULTS;
use tracing::{info, warn};

const DEFAULT_DATA_DIR: &str = "data";

pub const DATA_DIR_VAR: &str = "COURSE_RECS_DATA_DIR";
pub const PAGE_SIZE_VAR: &str = "COURSE_RECS_PAGE_SIZE";
pub const MAX_RECOMMENDATIONS_VAR: &str = "COURSE_RECS_MAX_RECOMMENDATIONS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `courses.json` and `users.json`
    pub data_dir: PathBuf,
    pub page_size: usize,
    pub max_recommendations: usize,
    pub quiz: QuizThresholds,
}

impl Config {
    pub fn load() -> Self {
        Self {
            data_dir: try_load::<String>(DATA_DIR_VAR, DEFAULT_DATA_DIR.to_string()).into(),
            page_size: try_load(PAGE_SIZE_VAR, DEFAULT_PAGE_SIZE).max(1),
            max_recommendations: try_load(MAX_RECOMMENDATIONS_VAR, DEFAULT_MAX_RESULTS),
            quiz: QuizThresholds::default(),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            max_recommendations: DEFAULT_MAX_RESULTS,
            quiz: QuizThresholds::default(),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or_default(key, env::var(key).ok(), default)
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

// =============================================================================
// Quiz scoring
// =============================================================================

/// Maps a quiz score to a progress percentage.
///
/// Bands are checked from the top down; the first whose minimum the score
/// reaches wins. Scores below every band get `floor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizThresholds {
    bands: Vec<(u32, u8)>,
    floor: u8,
}

impl QuizThresholds {
    /// Build from `(minimum score, progress)` pairs in any order
    pub fn new(mut bands: Vec<(u32, u8)>, floor: u8) -> Self {
        bands.sort_by(|a, b| b.0.cmp(&a.0));
        for band in &mut bands {
            band.1 = band.1.min(100);
        }
        Self {
            bands,
            floor: floor.min(100),
        }
    }

    pub fn progress_for(&self, score: u32) -> u8 {
        self.bands
            .iter()
            .find(|(minimum, _)| score >= *minimum)
            .map(|(_, progress)| *progress)
            .unwrap_or(self.floor)
    }
}

impl Default for QuizThresholds {
    fn default() -> Self {
        Self::new(vec![(80, 100), (50, 75), (30, 50)], 25)
    }
}
