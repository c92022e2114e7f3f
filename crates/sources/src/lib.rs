//! # Sources Crate
//!
//! This crate implements candidate generation for course recommendations.
//!
//! ## Components
//!
//! ### Content Source (history-based)
//! Keyword and category relevance against the learner's enrollments:
//! - Keywords come from course titles and skill lists
//! - The learner's most frequent category earns a bonus
//!
//! ### Questionnaire Source (cold start)
//! Filter-and-fill over the catalog from onboarding answers:
//! - Domain and learning style first
//! - Learning style alone next
//! - Anything else to reach a minimum
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{build_learner_profile, ContentSource, QuestionnaireAnswers, QuestionnaireSource};
//!
//! let profile = build_learner_profile(&enrolled);
//! let scored = ContentSource::new().get_candidates(&profile, catalog.courses());
//!
//! let answers = QuestionnaireAnswers::new(Some("Data Analysis"), Some("Visual"));
//! let matched = QuestionnaireSource::new().get_candidates(&answers, catalog.courses());
//! ```

// Public modules
pub mod types;
pub mod keywords;
pub mod learner;
pub mod content;
pub mod questionnaire;

// Re-export commonly used types
pub use types::{Candidate, CandidateMetadata, CandidateSource, LearnerProfile, MatchStage};
pub use keywords::{extract_keywords, KeywordSet, Keywords};
pub use learner::{build_learner_profile, preferred_category};
pub use content::ContentSource;
pub use questionnaire::{QuestionnaireAnswers, QuestionnaireSource};
