use catalog::CatalogError;
use thiserror::Error;

/// Everything a caller of the service layer can get back as a failure
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    Unauthorized,

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("Not enrolled in course: {0}")]
    EnrollmentNotFound(String),

    #[error("Course already completed: {0}")]
    AlreadyCompleted(String),

    #[error("Storage error: {0}")]
    Storage(#[from] CatalogError),

    #[error("Recommendation failed: {0:#}")]
    Recommendation(anyhow::Error),

    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
