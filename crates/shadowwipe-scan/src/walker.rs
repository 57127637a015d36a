//! Parallel directory traversal producing [`FileInfo`] records.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use compact_str::CompactString;
use jwalk::{Parallelism, WalkDir};

use shadowwipe_core::{CancelToken, FileInfo, ScanError, ScanSettings};

/// Parallel walker that applies the scan filters during traversal.
///
/// Filters, in order per entry: unreadable entries are skipped, excluded
/// directories prune their whole subtree, hidden entries are skipped when
/// configured, symlinks are neither followed nor reported, entries that
/// cannot be stat'd are skipped, and files below the minimum size are
/// skipped. The minimum size is at least 1, so zero-byte files never pass.
pub struct Walker {
    min_size: u64,
    excluded_dirs: Arc<HashSet<String>>,
    skip_hidden: bool,
}

impl Walker {
    /// Build a walker from scan settings.
    pub fn new(settings: &ScanSettings) -> Self {
        Self {
            min_size: settings.effective_min_size(),
            excluded_dirs: Arc::new(settings.excluded_dirs.iter().cloned().collect()),
            skip_hidden: settings.skip_hidden,
        }
    }

    /// Walk every root and collect the files that pass all filters.
    ///
    /// Per-entry errors are non-fatal. The walk aborts only when a root
    /// cannot be traversed at all, or on cancellation. Result order is
    /// unspecified.
    pub fn walk(
        &self,
        roots: &[PathBuf],
        cancel: &CancelToken,
    ) -> Result<Vec<FileInfo>, ScanError> {
        let mut files = Vec::new();
        for root in roots {
            if cancel.is_cancelled() {
                return Err(ScanError::Cancelled);
            }
            self.walk_root(root, cancel, &mut files)?;
        }
        Ok(files)
    }

    fn walk_root(
        &self,
        root: &Path,
        cancel: &CancelToken,
        files: &mut Vec<FileInfo>,
    ) -> Result<(), ScanError> {
        let root = root.canonicalize().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ScanError::NotFound {
                    path: root.to_path_buf(),
                }
            } else {
                ScanError::Walk {
                    path: root.to_path_buf(),
                    source,
                }
            }
        })?;
        if !root.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }
        // An unreadable root is the one catastrophic case; check it up
        // front so deeper read errors can stay non-fatal.
        std::fs::read_dir(&root).map_err(|source| ScanError::Walk {
            path: root.clone(),
            source,
        })?;

        let excluded = Arc::clone(&self.excluded_dirs);
        let walk_cancel = cancel.clone();

        let walker = WalkDir::new(&root)
            .parallelism(Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            })
            .skip_hidden(self.skip_hidden)
            .follow_links(false)
            .process_read_dir(move |_depth, _path, _state, children| {
                if walk_cancel.is_cancelled() {
                    children.clear();
                    return;
                }
                children.retain(|entry| match entry {
                    Ok(entry) => {
                        !(entry.file_type().is_dir()
                            && entry
                                .file_name()
                                .to_str()
                                .is_some_and(|name| excluded.contains(name)))
                    }
                    // Keep errors; the consumer loop skips them.
                    Err(_) => true,
                });
            });

        for entry in walker {
            if cancel.is_cancelled() {
                return Err(ScanError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::trace!("skipping unreadable entry: {err}");
                    continue;
                }
            };

            // Only regular files become candidates; this also drops
            // symlinks, which are never followed.
            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(_) => continue,
            };

            let size = metadata.len();
            if size < self.min_size {
                continue;
            }

            let path = entry.path();
            let extension = path
                .extension()
                .map(|ext| CompactString::new(ext.to_string_lossy().to_lowercase()))
                .unwrap_or_default();
            let modified = metadata
                .modified()
                .ok()
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map(|elapsed| elapsed.as_secs() as i64)
                .unwrap_or(0);

            files.push(FileInfo {
                name: CompactString::new(entry.file_name().to_string_lossy()),
                extension,
                path,
                size,
                modified,
                partial_hash: String::new(),
                full_hash: String::new(),
                perceptual_hash: String::new(),
            });
        }

        Ok(())
    }
}
