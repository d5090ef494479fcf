//! # learn-db
//!
//! The in-process SQL engine behind sqlearn.
//!
//! Loads a libSQL engine from the first working source, creates a database,
//! seeds the sample dataset, and runs learner queries through the
//! [`learn_core::QueryExecutor`] seam.

pub mod dataset;
pub mod engine;
pub mod error;
mod executor;
mod handle;

pub use engine::{EngineFactory, EngineSource, SourceLocation, load_engine};
pub use error::{DatabaseError, EngineAttempt, EngineLoadError};
pub use handle::DbHandle;

use learn_config::EngineConfig;

/// Owns the engine and the live, seeded database for one session.
///
/// After [`TutorDb::close`], executions fail with "database is not
/// initialized" until [`TutorDb::reset`] seeds a new database.
#[derive(Debug)]
pub struct TutorDb {
    factory: EngineFactory,
    handle: Option<DbHandle>,
}

impl TutorDb {
    /// Load an engine from `sources`, then create and seed a database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::EngineLoad` if no source loads, or
    /// `DatabaseError::Seed` if the dataset cannot be created. A database
    /// that failed to seed is closed before the error is returned.
    pub async fn open(sources: &[EngineSource]) -> Result<Self, DatabaseError> {
        let factory = load_engine(sources).await?;
        let handle = seeded_handle(&factory, dataset::SCHEMA).await?;
        Ok(Self {
            factory,
            handle: Some(handle),
        })
    }

    /// [`TutorDb::open`] with the sources listed in `config`.
    ///
    /// # Errors
    ///
    /// See [`TutorDb::open`].
    pub async fn from_config(config: &EngineConfig) -> Result<Self, DatabaseError> {
        Self::open(&EngineSource::from_config(config)).await
    }

    /// A seeded in-memory database.
    ///
    /// # Errors
    ///
    /// See [`TutorDb::open`].
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        Self::open(&[EngineSource::memory()]).await
    }

    #[must_use]
    pub const fn factory(&self) -> &EngineFactory {
        &self.factory
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    pub(crate) const fn handle(&self) -> Option<&DbHandle> {
        self.handle.as_ref()
    }

    /// Release the database. Calling this again is a no-op.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.close();
            tracing::debug!("database closed");
        }
    }

    /// Replace the database with a freshly seeded one, discarding any
    /// changes the learner made.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the new database cannot be created or
    /// seeded; the context is then closed.
    pub async fn reset(&mut self) -> Result<(), DatabaseError> {
        self.close();
        self.handle = Some(seeded_handle(&self.factory, dataset::SCHEMA).await?);
        tracing::info!("database reset");
        Ok(())
    }

    /// Current row counts of the sample tables.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotInitialized` after close, or the engine
    /// error if a table was dropped.
    pub async fn table_counts(&self) -> Result<Vec<(&'static str, i64)>, DatabaseError> {
        let handle = self.handle().ok_or(DatabaseError::NotInitialized)?;
        let mut counts = Vec::with_capacity(dataset::TABLES.len());
        for table in dataset::TABLES {
            let mut rows = handle
                .conn()
                .query(&format!("SELECT COUNT(*) FROM {}", table.name), ())
                .await?;
            let count = match rows.next().await? {
                Some(row) => row.get::<i64>(0)?,
                None => 0,
            };
            counts.push((table.name, count));
        }
        Ok(counts)
    }
}

impl Drop for TutorDb {
    fn drop(&mut self) {
        self.close();
    }
}

/// Create a database and seed it, closing it again if seeding fails.
async fn seeded_handle(factory: &EngineFactory, schema: &str) -> Result<DbHandle, DatabaseError> {
    let handle = factory.create_database().await?;
    match dataset::seed_with_schema(handle.conn(), schema).await {
        Ok(()) => Ok(handle),
        Err(e) => {
            tracing::warn!(error = %e, "seeding failed, closing database");
            handle.close();
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::{QueryExecutor, ScalarValue};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn open_seeds_the_sample_tables() {
        let db = TutorDb::in_memory().await.unwrap();
        assert!(db.is_open());
        assert_eq!(
            db.table_counts().await.unwrap(),
            vec![("movies", 14), ("boxoffice", 14), ("theaters", 5)]
        );
    }

    #[tokio::test]
    async fn close_is_idempotent_and_blocks_execution() {
        let mut db = TutorDb::in_memory().await.unwrap();
        db.close();
        db.close();
        assert!(!db.is_open());

        let err = db.execute("SELECT 1").await.unwrap_err();
        assert_eq!(err.message, "database is not initialized");
        assert!(matches!(
            db.table_counts().await,
            Err(DatabaseError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn reset_undoes_learner_changes() {
        let mut db = TutorDb::in_memory().await.unwrap();
        db.execute("DELETE FROM movies").await.unwrap();
        let result = db.execute("SELECT COUNT(*) AS n FROM movies").await.unwrap();
        assert_eq!(result.rows[0].get("n"), Some(&ScalarValue::Integer(0)));

        db.reset().await.unwrap();
        let result = db.execute("SELECT COUNT(*) AS n FROM movies").await.unwrap();
        assert_eq!(result.rows[0].get("n"), Some(&ScalarValue::Integer(14)));
    }

    #[tokio::test]
    async fn failed_seed_removes_the_scratch_database() {
        let dir = tempfile::tempdir().unwrap();
        let factory = load_engine(&[EngineSource::directory("scratch", dir.path())])
            .await
            .unwrap();

        let err = seeded_handle(&factory, "CREATE TABLE broken (").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Seed(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn reset_reopens_a_closed_context() {
        let mut db = TutorDb::in_memory().await.unwrap();
        db.close();
        db.reset().await.unwrap();
        assert!(db.execute("SELECT * FROM theaters").await.is_ok());
    }
}
