//! Task store — the persisted task list.
//!
//! The whole list lives in one JSON document, `<root>/tasks.json`, written
//! in full on every change. All I/O goes through the `FileSystem` port.
//! Reading is forgiving: a missing or corrupt document loads as an empty
//! list so the board always starts.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::context::ServiceContext;
use crate::ports::PortError;
use crate::task::TaskRecord;

/// File name of the task document inside the store directory.
pub const TASKS_FILE: &str = "tasks.json";

/// Failure reading or writing the task document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Document path.
        path: PathBuf,
        /// Port error.
        source: PortError,
    },
    /// The document is not a valid task list.
    #[error("{path} does not contain a valid task list: {source}")]
    Corrupt {
        /// Document path.
        path: PathBuf,
        /// Parse error.
        source: serde_json::Error,
    },
    /// The list could not be serialized.
    #[error("failed to serialize task list: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The document could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Document path.
        path: PathBuf,
        /// Port error.
        source: PortError,
    },
}

/// Loads and saves the ordered task list.
pub struct TaskStore<'a> {
    ctx: &'a ServiceContext,
    path: PathBuf,
}

impl<'a> TaskStore<'a> {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, path: root.join(TASKS_FILE) }
    }

    /// Path of the task document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the task list, falling back to an empty list when nothing is
    /// stored or the stored document is unreadable.
    #[must_use]
    pub fn load(&self) -> Vec<TaskRecord> {
        match self.try_load() {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(error = %err, "starting with an empty task list");
                Vec::new()
            }
        }
    }

    /// Loads the task list, reporting why it could not be read.
    ///
    /// A missing document is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] or [`StoreError::Corrupt`].
    pub fn try_load(&self) -> Result<Vec<TaskRecord>, StoreError> {
        if !self.ctx.fs.exists(&self.path) {
            return Ok(Vec::new());
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&self.path)
            .map_err(|source| StoreError::Read { path: self.path.clone(), source })?;
        let tasks: Vec<TaskRecord> = serde_json::from_str(&contents)
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })?;
        tracing::debug!(tasks = tasks.len(), path = %self.path.display(), "loaded task list");
        Ok(tasks)
    }

    /// Replaces the stored list with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails. Callers treat
    /// this as best-effort and log it.
    pub fn save(&self, tasks: &[TaskRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tasks).map_err(StoreError::Serialize)?;
        self.ctx
            .fs
            .write(&self.path, &json)
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })?;
        tracing::debug!(tasks = tasks.len(), path = %self.path.display(), "saved task list");
        Ok(())
    }
}
