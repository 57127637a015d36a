//! Staged duplicate-detection pipeline for shadowwipe.
//!
//! The pipeline narrows a large candidate pool down to confirmed duplicate
//! groups using progressively more expensive fingerprints:
//!
//! 1. Walk the roots in parallel, applying size/hidden/exclusion filters
//! 2. Bucket by size, discarding unique sizes
//! 3. Partial BLAKE3 hash (first + last 64 KiB), bucket, discard uniques
//! 4. Full BLAKE3 hash, bucket into exact groups
//! 5. Optionally, perceptual-hash the image files and cluster them by
//!    Hamming distance into similar groups
//!
//! Every parallel stage is capped at the logical CPU count, checks a shared
//! [`CancelToken`] and reports progress through an injected callback.
//!
//! ```rust,ignore
//! use shadowwipe_scan::{CancelToken, Scanner};
//! use shadowwipe_core::ScanSettings;
//!
//! let settings = ScanSettings::builder()
//!     .paths(vec!["/home/user/Pictures".into()])
//!     .similarity_threshold(8.0)
//!     .build()
//!     .unwrap();
//!
//! let scanner = Scanner::new(settings)
//!     .with_progress(|stage, done, total| eprintln!("{stage}: {done}/{total}"));
//!
//! let groups = scanner.run(&CancelToken::new())?;
//! ```

mod cluster;
mod grouper;
mod hasher;
mod perceptual;
mod pipeline;
mod walker;

pub use cluster::cluster_similar;
pub use grouper::{flatten, group_by_hash, group_by_size};
pub use hasher::{full_hash, partial_hash};
pub use perceptual::{is_image, perceptual_hash};
pub use pipeline::{ProgressCallback, Scanner};
pub use walker::Walker;

// Re-export core types for convenience
pub use shadowwipe_core::{
    CancelToken, DuplicateGroup, DuplicateKind, FileInfo, ScanError, ScanSettings,
};
