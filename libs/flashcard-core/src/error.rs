//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using GradeError.
pub type Result<T> = std::result::Result<T, GradeError>;

/// Reasons a grading attempt can't produce a usable judgment.
///
/// Every variant is recoverable: the grader turns it into a worst-case
/// `GradeResult` instead of failing the request.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("error decoding generated response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("score is not a number: {value}")]
    InvalidScore { value: String },

    #[error("judge call failed: {0}")]
    Judge(String),

    #[error("judge returned an empty response")]
    EmptyResponse,
}

/// Reasons a schedule can't be advanced.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidState { field: &'static str, value: f64 },

    #[error("next review date is out of range")]
    DateOutOfRange,
}
