//! A single open database.

use std::path::Path;

use tempfile::TempPath;

/// An open database and its connection.
///
/// [`DbHandle::close`] consumes the handle, so it can only be closed once.
/// Dropping an unclosed handle releases the same resources.
pub struct DbHandle {
    conn: libsql::Connection,
    db: libsql::Database,
    scratch: Option<TempPath>,
}

impl DbHandle {
    pub(crate) const fn new(
        db: libsql::Database,
        conn: libsql::Connection,
        scratch: Option<TempPath>,
    ) -> Self {
        Self { conn, db, scratch }
    }

    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Scratch file backing this database, if it is not in memory.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.scratch.as_deref()
    }

    /// Release the connection and database, then remove any scratch file.
    pub fn close(self) {
        let Self { conn, db, scratch } = self;
        drop(conn);
        drop(db);
        if let Some(path) = scratch {
            let shown = path.display().to_string();
            if let Err(e) = path.close() {
                tracing::warn!(path = %shown, error = %e, "failed to remove scratch database");
            }
        }
    }
}

impl std::fmt::Debug for DbHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbHandle")
            .field("scratch", &self.path())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::{EngineSource, load_engine};

    #[tokio::test]
    async fn close_removes_the_scratch_file() {
        let dir = tempfile::tempdir().unwrap();
        let factory = load_engine(&[EngineSource::directory("scratch", dir.path())])
            .await
            .unwrap();

        let handle = factory.create_database().await.unwrap();
        let path = handle.path().map(std::path::Path::to_path_buf).unwrap();
        assert!(path.exists());

        handle.close();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn memory_handles_have_no_path() {
        let factory = load_engine(&[EngineSource::memory()]).await.unwrap();
        let handle = factory.create_database().await.unwrap();
        assert!(handle.path().is_none());
        handle.close();
    }
}
