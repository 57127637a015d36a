//! Error types for host-boundary operations.

use thiserror::Error;

/// Errors from the operations crate.
#[derive(Debug, Error)]
pub enum OpsError {
    /// A batch operation was called with nothing to do.
    #[error("no paths provided")]
    NoPaths,

    /// The current platform has no implementation for this operation.
    #[error("unsupported platform")]
    UnsupportedPlatform,

    /// Underlying I/O failure while launching a system tool.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
