//! Engine acquisition: try each configured source until one answers.

use std::fmt;
use std::path::{Path, PathBuf};

use learn_config::{EngineConfig, EngineSourceConfig, MEMORY_LOCATION};
use libsql::Builder;
use tempfile::TempPath;

use crate::error::{DatabaseError, EngineAttempt, EngineLoadError};
use crate::handle::DbHandle;

/// Where a source keeps its databases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Memory,
    /// Each database is a scratch file in this directory, removed on close.
    Directory(PathBuf),
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str(MEMORY_LOCATION),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSource {
    pub label: String,
    pub location: SourceLocation,
}

impl EngineSource {
    #[must_use]
    pub fn memory() -> Self {
        Self {
            label: "memory".to_string(),
            location: SourceLocation::Memory,
        }
    }

    #[must_use]
    pub fn directory(label: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            location: SourceLocation::Directory(dir.into()),
        }
    }

    /// Sources in the order the config lists them.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Vec<Self> {
        config.sources.iter().map(Self::from).collect()
    }

    /// Open a fresh, empty database at this source.
    async fn open(&self) -> Result<DbHandle, DatabaseError> {
        let (db, scratch) = match &self.location {
            SourceLocation::Memory => (Builder::new_local(MEMORY_LOCATION).build().await?, None),
            SourceLocation::Directory(dir) => {
                let scratch = scratch_file(dir)?;
                (Builder::new_local(&*scratch).build().await?, Some(scratch))
            }
        };
        let conn = db.connect()?;
        // Learner DML runs without foreign key enforcement.
        conn.execute("PRAGMA foreign_keys = OFF", ()).await?;
        Ok(DbHandle::new(db, conn, scratch))
    }

    /// Check the source can host a database and report the engine version.
    async fn probe(&self) -> Result<String, DatabaseError> {
        if let SourceLocation::Directory(dir) = &self.location {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
        }
        let handle = self.open().await?;
        let version = engine_version(handle.conn()).await;
        handle.close();
        version
    }
}

impl From<&EngineSourceConfig> for EngineSource {
    fn from(config: &EngineSourceConfig) -> Self {
        let location = if config.is_memory() {
            SourceLocation::Memory
        } else {
            SourceLocation::Directory(PathBuf::from(&config.location))
        };
        Self {
            label: config.label.clone(),
            location,
        }
    }
}

fn scratch_file(dir: &Path) -> Result<TempPath, DatabaseError> {
    tempfile::Builder::new()
        .prefix("sqlearn-")
        .suffix(".db")
        .tempfile_in(dir)
        .map(tempfile::NamedTempFile::into_temp_path)
        .map_err(|e| anyhow::anyhow!("cannot create scratch file in {}: {e}", dir.display()).into())
}

async fn engine_version(conn: &libsql::Connection) -> Result<String, DatabaseError> {
    let mut rows = conn.query("SELECT sqlite_version()", ()).await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::Query("engine returned no version".to_string()))?;
    Ok(row.get::<String>(0)?)
}

/// A loaded engine. Creates independent databases on demand.
#[derive(Debug, Clone)]
pub struct EngineFactory {
    source: EngineSource,
    version: String,
}

impl EngineFactory {
    #[must_use]
    pub const fn source(&self) -> &EngineSource {
        &self.source
    }

    /// Engine version reported by the probe, e.g. `3.45.1`.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Create an empty database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the engine cannot open a new database.
    pub async fn create_database(&self) -> Result<DbHandle, DatabaseError> {
        self.source.open().await
    }
}

/// Try `sources` in order and return the first that loads.
///
/// Each failure is logged and recorded; there are no retries beyond the list.
///
/// # Errors
///
/// Returns `DatabaseError::EngineLoad` listing every attempt when all fail.
pub async fn load_engine(sources: &[EngineSource]) -> Result<EngineFactory, DatabaseError> {
    let mut attempts = Vec::with_capacity(sources.len());
    for source in sources {
        match source.probe().await {
            Ok(version) => {
                tracing::info!(
                    source = %source.label,
                    location = %source.location,
                    %version,
                    "SQL engine loaded"
                );
                return Ok(EngineFactory {
                    source: source.clone(),
                    version,
                });
            }
            Err(e) => {
                tracing::warn!(source = %source.label, error = %e, "engine source failed");
                attempts.push(EngineAttempt {
                    label: source.label.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    Err(EngineLoadError { attempts }.into())
}
