//! Error types for the catalog crate.
//!
//! Everything that crosses the persistence boundary (catalog and profile
//! documents) is decoded and validated here, so these are the only errors a
//! caller sees for malformed data.

use thiserror::Error;

/// Errors that can occur while loading, validating or saving documents
///
/// The `#[derive(Error)]` macro from thiserror implements `std::error::Error`
/// and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A document could not be decoded
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
