//! Per-job temp-file ledger.

use std::path::PathBuf;

use tracing::{debug, warn};

/// Tracks every scratch file created during one job and removes them all at
/// the job's single wrap-up point, whatever the outcome. Paths are
/// registered before the producing operation runs, so a partial file from a
/// failed write is still cleaned up.
#[derive(Debug, Default)]
pub struct TempFileLedger {
    files: Vec<PathBuf>,
}

impl TempFileLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a scratch path for removal when the job ends.
    pub fn register(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    /// Paths currently tracked.
    pub fn registered(&self) -> &[PathBuf] {
        &self.files
    }

    /// Remove every tracked file. Files that were never created are fine;
    /// removal failures are logged and skipped.
    pub async fn release_all(&mut self) {
        for path in self.files.drain(..) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!(path = %path.display(), "Removed temp file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove temp file"),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
