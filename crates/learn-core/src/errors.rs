//! Cross-cutting error types for sqlearn.
//!
//! Engine-level failures (`DatabaseError`) live in `learn-db`. `QueryError` is
//! defined here because it crosses the controller boundary as plain data: a
//! learner's broken query is an expected outcome, not a fault.

use serde::Serialize;
use thiserror::Error;

/// Errors that can be raised by any sqlearn crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The lesson catalog violates its ordering invariant.
    #[error("Invalid lesson catalog: {0}")]
    Catalog(String),

    /// Lesson lookup returned no result.
    #[error("Lesson not found: {0}")]
    LessonNotFound(u32),
}

/// A learner-submitted query could not be executed.
///
/// Recoverable: reported next to the query and cleared by the next submission.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
}

impl QueryError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The executor was asked to run a query before a handle existed (or after close).
    #[must_use]
    pub fn not_initialized() -> Self {
        Self::new("database is not initialized")
    }

    /// The submission was empty or whitespace only.
    #[must_use]
    pub fn blank() -> Self {
        Self::new("Please enter a SQL query")
    }
}
