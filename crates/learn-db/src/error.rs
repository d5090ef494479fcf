//! Database error types for learn-db.

use std::fmt;

use thiserror::Error;

/// Errors from engine loading, seeding, and database lifecycle.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Every configured engine source failed to load.
    #[error(transparent)]
    EngineLoad(#[from] EngineLoadError),

    /// Creating or populating the sample dataset failed.
    #[error("Failed to seed sample dataset: {0}")]
    Seed(String),

    /// A SQL statement failed outside of learner query execution.
    #[error("Query failed: {0}")]
    Query(String),

    /// The database handle was already closed.
    #[error("database is not initialized")]
    NotInitialized,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// One failed engine source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineAttempt {
    pub label: String,
    pub reason: String,
}

/// All sources were tried and none produced a working engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct EngineLoadError {
    pub attempts: Vec<EngineAttempt>,
}

impl fmt::Display for EngineLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts.is_empty() {
            return f.write_str("Failed to load SQL engine: no engine sources configured");
        }
        write!(
            f,
            "Failed to load SQL engine from {} source(s):",
            self.attempts.len()
        )?;
        for attempt in &self.attempts {
            write!(f, " [{}: {}]", attempt.label, attempt.reason)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_lists_every_attempt() {
        let err = EngineLoadError {
            attempts: vec![
                EngineAttempt {
                    label: "cache".into(),
                    reason: "permission denied".into(),
                },
                EngineAttempt {
                    label: "memory".into(),
                    reason: "out of memory".into(),
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 source(s)"));
        assert!(msg.contains("[cache: permission denied]"));
        assert!(msg.contains("[memory: out of memory]"));
    }

    #[test]
    fn empty_load_error_says_so() {
        let err = EngineLoadError { attempts: vec![] };
        assert!(err.to_string().contains("no engine sources"));
    }
}
