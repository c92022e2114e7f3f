//! Pipeline for filtering and ranking course candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - rank_and_select for stable top-K selection
//! - RecommendationScorer, the entry point used by the service layer
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Sources score or select catalog courses
//! 2. Filters remove unwanted candidates (already enrolled)
//! 3. Ranking sorts by score, dedupes titles and truncates
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::RecommendationScorer;
//!
//! let scorer = RecommendationScorer::new();
//! let courses = scorer.recommend(&enrolled, catalog.courses())?;
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ranking;
pub mod scorer;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use ranking::{rank_and_select, DEFAULT_MAX_RESULTS};
pub use scorer::{RecommendationScorer, ScoredCourse};
