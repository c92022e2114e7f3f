//! # Catalog Crate
//!
//! This crate owns the persistence boundary of the course backend: the typed
//! records, decoding and validation of the stored documents, and the
//! in-memory catalog index.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CourseRecord, EnrollmentRecord, UserProfile)
//! - **parser**: Decode and validate the JSON documents
//! - **index**: CatalogIndex with title/category lookups and paged search
//! - **error**: Error types for loading and validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{load_data_dir, SearchQuery, DEFAULT_PAGE_SIZE};
//! use std::path::Path;
//!
//! let (catalog, profiles) = load_data_dir(Path::new("data"))?;
//!
//! let course = catalog.get_course("Deep Learning Basics").unwrap();
//! let page = catalog.search(&SearchQuery { query: "data".into(), ..Default::default() }, DEFAULT_PAGE_SIZE);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use index::{load_data_dir, CatalogIndex, COURSES_FILE, DEFAULT_PAGE_SIZE, USERS_FILE};
pub use types::{
    // Type aliases
    CourseTitle,
    Email,
    // Core types
    CourseRecord,
    EnrollmentRecord,
    EnrollmentStatus,
    UserProfile,
    SearchQuery,
    SearchPage,
    // Vocabulary
    GENERAL_CATEGORY,
    LEARNING_STYLES,
};
