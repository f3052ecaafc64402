//! Durable storage for the progress record
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, SurakshaError};

/// Name of the single durable record holding the progress set
pub const PROGRESS_RECORD: &str = "suraksha_progress";

/// Backend for the progress record
///
/// `read` returns `Ok(None)` when nothing has been persisted yet.
pub trait ProgressStorage {
    fn read(&self) -> Result<Option<String>>;
    fn write(&mut self, record: &str) -> Result<()>;
    /// Human-readable location for logs and diagnostics
    fn location(&self) -> String;
}

/// JSON file backend: `<state_dir>/suraksha_progress.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage for the progress record inside `state_dir`
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        let path = state_dir
            .as_ref()
            .join(format!("{}.json", PROGRESS_RECORD));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: std::io::Error) -> SurakshaError {
        SurakshaError::Storage {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ProgressStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| self.storage_error(e))
    }

    fn write(&mut self, record: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }

        fs::write(&self.path, record).map_err(|e| self.storage_error(e))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    record: Option<String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing record, as if a previous session saved it
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
            writes: 0,
        }
    }

    /// Number of writes performed
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ProgressStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.record.clone())
    }

    fn write(&mut self, record: &str) -> Result<()> {
        self.record = Some(record.to_string());
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        format!("memory:{}", PROGRESS_RECORD)
    }
}
