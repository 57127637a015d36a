//! Error types for scanning operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can end a scan.
///
/// Per-entry problems (unreadable files, undecodable images) never surface
/// here; the affected file is skipped or dropped by the next grouping pass.
/// Only a root-level traversal failure or cancellation aborts the pipeline.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A scan root does not exist.
    #[error("walk: path not found: {path}")]
    NotFound { path: PathBuf },

    /// A scan root is not a directory.
    #[error("walk: not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The traversal engine failed at the root level.
    #[error("walk: {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan was cancelled via its token.
    #[error("scan cancelled")]
    Cancelled,
}

impl ScanError {
    /// True for cooperative cancellation, which the host reports as
    /// "Scan cancelled" rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
