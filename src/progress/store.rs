//! Progress store: the in-memory progress set plus its durable record
use tracing::{debug, info, warn};

use super::persistence::ProgressStorage;
use super::{ModuleId, ProgressSet};
use crate::errors::Result;

/// Owns the completed-module set and keeps its record in sync
///
/// There is no removal operation: progress is permanent.
pub struct ProgressStore {
    storage: Box<dyn ProgressStorage>,
    progress: ProgressSet,
}

impl ProgressStore {
    /// Open the store, loading whatever was persisted
    pub fn open(storage: Box<dyn ProgressStorage>) -> Self {
        let progress = Self::load(storage.as_ref());
        Self { storage, progress }
    }

    /// Read the persisted set, degrading to empty on absence or corruption
    pub fn load(storage: &dyn ProgressStorage) -> ProgressSet {
        let record = match storage.read() {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(location = %storage.location(), "No progress record yet");
                return ProgressSet::new();
            }
            Err(e) => {
                warn!(error = %e, "Progress record unreadable, starting fresh");
                return ProgressSet::new();
            }
        };

        match ProgressSet::from_json(&record) {
            Ok(set) => {
                debug!(completed = set.len(), "Progress loaded");
                set
            }
            Err(e) => {
                warn!(
                    location = %storage.location(),
                    error = %e,
                    "Progress record malformed, starting fresh"
                );
                ProgressSet::new()
            }
        }
    }

    /// Record a completed module
    ///
    /// Returns `Ok(true)` when the set grew and was persisted, `Ok(false)`
    /// when the module was already complete. On a write failure the
    /// in-memory set keeps the module and the error is returned.
    pub fn mark_complete(&mut self, id: ModuleId) -> Result<bool> {
        if !self.progress.insert(id) {
            debug!(module = %id, "Module already complete");
            return Ok(false);
        }

        info!(module = %id, completed = self.progress.len(), "Module completed");
        self.persist()?;
        Ok(true)
    }

    /// Record a completed module named by a raw token
    ///
    /// Unrecognized tokens are ignored.
    pub fn mark_complete_token(&mut self, token: &str) -> Result<bool> {
        match ModuleId::from_token(token) {
            Some(id) => self.mark_complete(id),
            None => {
                debug!(token = %token, "Ignoring unknown module token");
                Ok(false)
            }
        }
    }

    fn persist(&mut self) -> Result<()> {
        let record = self.progress.to_json()?;
        self.storage.write(&record)
    }

    pub fn progress(&self) -> &ProgressSet {
        &self.progress
    }

    pub fn completed_count(&self) -> usize {
        self.progress.len()
    }

    pub fn storage(&self) -> &dyn ProgressStorage {
        self.storage.as_ref()
    }
}
