//! File metadata records produced by the walker.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Metadata for one regular file discovered during traversal.
///
/// The walker fills in everything except the hash fields. Those start empty
/// and are written exactly once by the stage that owns them; a stage that
/// cannot read the file leaves its field empty and the next grouping pass
/// drops the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    /// Absolute path to the file.
    pub path: PathBuf,

    /// Final path component.
    pub name: CompactString,

    /// Lowercase extension without the leading dot; empty if none.
    pub extension: CompactString,

    /// File length in bytes, always >= 1 by construction.
    pub size: u64,

    /// Last modification time, whole seconds since the Unix epoch.
    pub modified: i64,

    /// BLAKE3 of the first and last 64 KiB, lowercase hex.
    #[serde(default)]
    pub partial_hash: String,

    /// BLAKE3 of the entire contents, lowercase hex.
    #[serde(default)]
    pub full_hash: String,

    /// 64-bit DCT perceptual hash, lowercase hex (images only).
    #[serde(default)]
    pub perceptual_hash: String,
}
