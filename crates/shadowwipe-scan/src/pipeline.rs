//! The staged scan pipeline orchestrator.

use shadowwipe_core::{CancelToken, DuplicateGroup, FileInfo, ScanError, ScanSettings};

use crate::cluster::cluster_similar;
use crate::grouper::{flatten, group_by_hash, group_by_size};
use crate::hasher::{full_hash, partial_hash};
use crate::perceptual::{is_image, perceptual_hash};
use crate::walker::Walker;

/// Injected progress sink, called from the orchestrator thread with
/// `(stage, processed, total)` before and after each expensive stage.
///
/// Stage names are `walking`, `partial-hashing`, `full-hashing` and
/// `perceptual-hashing`. Total is 0 for the initial walking emission.
pub type ProgressCallback = Box<dyn Fn(&str, usize, usize) + Send + Sync>;

/// Orchestrates the staged deduplication pipeline.
///
/// Settings are read once at construction and stay fixed for the scan.
/// Each stage's worker pool fully drains before the next stage starts, and
/// the shared [`CancelToken`] is checked between stages as well as inside
/// every worker task.
pub struct Scanner {
    settings: ScanSettings,
    on_progress: Option<ProgressCallback>,
}

impl Scanner {
    /// Create a scanner for the given settings.
    pub fn new(settings: ScanSettings) -> Self {
        Self {
            settings,
            on_progress: None,
        }
    }

    /// Register a progress callback.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, usize, usize) + Send + Sync + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Run the full pipeline and return exact groups followed by similar
    /// groups.
    ///
    /// Exact groups come from size, partial-hash and full-hash bucketing.
    /// When the similarity threshold is positive, the image files found by
    /// the walk are additionally fingerprinted and clustered by Hamming
    /// distance; re-encoded images rarely share a size bucket, so the
    /// similar track works from the walked set rather than the exact
    /// track's survivors.
    pub fn run(&self, cancel: &CancelToken) -> Result<Vec<DuplicateGroup>, ScanError> {
        self.emit("walking", 0, 0);
        let walker = Walker::new(&self.settings);
        let files = walker.walk(&self.settings.paths, cancel)?;
        self.emit("walking", files.len(), files.len());
        tracing::debug!(files = files.len(), "walk complete");
        self.check(cancel)?;

        let cluster = self.settings.similarity_threshold > 0.0;
        let images: Vec<FileInfo> = if cluster {
            files.iter().filter(|f| is_image(f)).cloned().collect()
        } else {
            Vec::new()
        };

        let mut groups = self.exact_groups(files, cancel)?;
        self.check(cancel)?;

        if cluster {
            let threshold = self.settings.similarity_threshold as u32;
            groups.extend(self.similar_groups(images, threshold, cancel)?);
        }

        Ok(groups)
    }

    /// The exact track: size bucket, partial hash, partial bucket, full
    /// hash, full bucket. Returns early when a grouping pass leaves no
    /// survivors.
    fn exact_groups(
        &self,
        files: Vec<FileInfo>,
        cancel: &CancelToken,
    ) -> Result<Vec<DuplicateGroup>, ScanError> {
        let candidates = flatten(group_by_size(files));
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        self.emit("partial-hashing", 0, candidates.len());
        let candidates = partial_hash(candidates, cancel)?;
        self.emit("partial-hashing", candidates.len(), candidates.len());
        self.check(cancel)?;

        let candidates = flatten(group_by_hash(candidates, |f| f.partial_hash.as_str()));
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        self.emit("full-hashing", 0, candidates.len());
        let candidates = full_hash(candidates, cancel)?;
        self.emit("full-hashing", candidates.len(), candidates.len());
        self.check(cancel)?;

        let groups: Vec<DuplicateGroup> = group_by_hash(candidates, |f| f.full_hash.as_str())
            .into_values()
            .map(DuplicateGroup::exact)
            .collect();
        tracing::debug!(groups = groups.len(), "exact grouping complete");
        Ok(groups)
    }

    /// The similar track: perceptual-hash the image candidates and cluster
    /// them.
    fn similar_groups(
        &self,
        images: Vec<FileInfo>,
        threshold: u32,
        cancel: &CancelToken,
    ) -> Result<Vec<DuplicateGroup>, ScanError> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        self.emit("perceptual-hashing", 0, images.len());
        let images = perceptual_hash(images, cancel)?;
        self.emit("perceptual-hashing", images.len(), images.len());
        self.check(cancel)?;

        let groups = cluster_similar(&images, threshold);
        tracing::debug!(groups = groups.len(), "similarity clustering complete");
        Ok(groups)
    }

    fn emit(&self, stage: &str, processed: usize, total: usize) {
        if let Some(callback) = &self.on_progress {
            callback(stage, processed, total);
        }
    }

    fn check(&self, cancel: &CancelToken) -> Result<(), ScanError> {
        if cancel.is_cancelled() {
            Err(ScanError::Cancelled)
        } else {
            Ok(())
        }
    }
}
