//! Append-only writer for the action log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::UserMgtError;

use super::entry::AuditEntry;

/// Appends entries to the action log.
///
/// The file is opened in append mode for every entry, so it is created by
/// the first write and never truncated.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    /// Create a logger for the given path. Nothing is touched on disk yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one entry as a single line.
    ///
    /// Syncs the file after writing for durability.
    pub fn log(&self, entry: &AuditEntry) -> Result<(), UserMgtError> {
        let to_log_error = |source| UserMgtError::Log {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(to_log_error)?;

        writeln!(file, "{}", entry).map_err(to_log_error)?;

        if let Err(e) = file.sync_data() {
            warn!(error = %e, path = %self.path.display(), "Failed to sync action log");
        }

        debug!(action = %entry.action, path = %self.path.display(), "Action logged");

        Ok(())
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
