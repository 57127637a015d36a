//! Core types and settings for shadowwipe.
//!
//! This crate provides the fundamental data structures shared by the scan
//! pipeline and the host-facing operation crates: file records, duplicate
//! groups, scan settings with their on-disk persistence, errors, and the
//! cancellation token.

mod cancel;
mod error;
mod file;
mod group;
mod settings;

pub use cancel::CancelToken;
pub use error::ScanError;
pub use file::FileInfo;
pub use group::{DuplicateGroup, DuplicateKind, prune_groups};
pub use settings::{ScanSettings, ScanSettingsBuilder, SizeUnit};
