//! Recoverable deletion via the system trash.

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::OpsError;

/// One path that could not be trashed, and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Record of a batch of files moved to the trash, enabling undo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOperation {
    /// Opaque unique id.
    pub id: String,
    /// Paths that reached the trash.
    pub deleted_paths: Vec<PathBuf>,
    /// Paths that could not be trashed.
    pub failed_paths: Vec<TrashFailure>,
    /// RFC 3339 UTC timestamp of the batch.
    pub timestamp: String,
}

impl DeleteOperation {
    /// Whether every path in the batch reached the trash.
    pub fn is_complete(&self) -> bool {
        self.failed_paths.is_empty()
    }
}

/// Move the given files to the system trash.
///
/// Per-file failures do not abort the batch: the result partitions the
/// input into deleted and failed paths so the caller can drop exactly the
/// removed files from its groups. An empty input is an error.
pub fn move_to_trash(paths: &[PathBuf]) -> Result<DeleteOperation, OpsError> {
    if paths.is_empty() {
        return Err(OpsError::NoPaths);
    }

    let mut deleted_paths = Vec::with_capacity(paths.len());
    let mut failed_paths = Vec::new();

    for path in paths {
        match ::trash::delete(path) {
            Ok(()) => deleted_paths.push(path.clone()),
            Err(err) => {
                tracing::warn!(path = %path.display(), "trash failed: {err}");
                failed_paths.push(TrashFailure {
                    path: path.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(DeleteOperation {
        id: Uuid::new_v4().to_string(),
        deleted_paths,
        failed_paths,
        timestamp: Utc::now().to_rfc3339(),
    })
}
