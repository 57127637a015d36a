//! Duplicate groups emitted by the scan pipeline.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::FileInfo;

/// Whether a group's members are byte-identical or perceptually similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKind {
    Exact,
    Similar,
}

/// A cluster of two or more files identified as duplicates.
///
/// Groups outlive the scan that produced them; the host hands their paths to
/// the trash facility and prunes groups as files disappear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Opaque unique id.
    pub id: String,

    /// Exact (identical full hash) or similar (perceptual match).
    pub kind: DuplicateKind,

    /// 0 for exact groups, a percentage in (0, 100) for similar groups.
    pub similarity: f64,

    /// Member files in insertion order. Always at least 2.
    pub files: Vec<FileInfo>,

    /// Sum of the member sizes.
    pub total_size: u64,

    /// Bytes reclaimable by keeping only the first member.
    pub wasted_size: u64,
}

impl DuplicateGroup {
    /// Create an exact group from files sharing a full hash.
    pub fn exact(files: Vec<FileInfo>) -> Self {
        Self::build(DuplicateKind::Exact, 0.0, files)
    }

    /// Create a similar group from perceptually clustered files.
    pub fn similar(files: Vec<FileInfo>, similarity: f64) -> Self {
        Self::build(DuplicateKind::Similar, similarity, files)
    }

    fn build(kind: DuplicateKind, similarity: f64, files: Vec<FileInfo>) -> Self {
        let total_size: u64 = files.iter().map(|f| f.size).sum();
        let wasted_size = total_size - files.first().map_or(0, |f| f.size);

        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            similarity,
            files,
            total_size,
            wasted_size,
        }
    }

    /// Number of member files.
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// How many files could be trashed while keeping one copy.
    pub fn deletable_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }
}

/// Remove trashed paths from `groups` after a deletion.
///
/// Groups left with fewer than two files are dropped; the rest get their
/// size totals recomputed against the surviving first member.
pub fn prune_groups(groups: &mut Vec<DuplicateGroup>, removed: &HashSet<PathBuf>) {
    groups.retain_mut(|group| {
        let before = group.files.len();
        group.files.retain(|f| !removed.contains(&f.path));

        if group.files.len() < 2 {
            return false;
        }
        if group.files.len() != before {
            group.total_size = group.files.iter().map(|f| f.size).sum();
            group.wasted_size = group.total_size - group.files[0].size;
        }
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;

    fn file(path: &str, size: u64) -> FileInfo {
        let path = PathBuf::from(path);
        let name = CompactString::new(path.file_name().unwrap().to_string_lossy());
        FileInfo {
            path,
            name,
            extension: CompactString::new("txt"),
            size,
            modified: 1_700_000_000,
            partial_hash: String::new(),
            full_hash: String::new(),
            perceptual_hash: String::new(),
        }
    }

    #[test]
    fn test_exact_group_sizes() {
        let group = DuplicateGroup::exact(vec![
            file("/a/x", 10),
            file("/b/x", 10),
            file("/c/x", 10),
        ]);

        assert_eq!(group.kind, DuplicateKind::Exact);
        assert_eq!(group.similarity, 0.0);
        assert_eq!(group.count(), 3);
        assert_eq!(group.deletable_count(), 2);
        assert_eq!(group.total_size, 30);
        assert_eq!(group.wasted_size, 20);
    }

    #[test]
    fn test_similar_group_similarity() {
        let group = DuplicateGroup::similar(vec![file("/a/i.jpg", 100), file("/b/i.jpg", 90)], 90.0);

        assert_eq!(group.kind, DuplicateKind::Similar);
        assert_eq!(group.similarity, 90.0);
        assert_eq!(group.total_size, 190);
        assert_eq!(group.wasted_size, 90);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&DuplicateKind::Exact).unwrap();
        assert_eq!(json, r#""exact""#);
        let json = serde_json::to_string(&DuplicateKind::Similar).unwrap();
        assert_eq!(json, r#""similar""#);
    }

    #[test]
    fn test_prune_updates_sizes() {
        let mut groups = vec![DuplicateGroup::exact(vec![
            file("/a/x", 10),
            file("/b/x", 10),
            file("/c/x", 10),
        ])];

        let removed: HashSet<PathBuf> = [PathBuf::from("/b/x")].into();
        prune_groups(&mut groups, &removed);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count(), 2);
        assert_eq!(groups[0].total_size, 20);
        assert_eq!(groups[0].wasted_size, 10);
    }

    #[test]
    fn test_prune_drops_group_below_two() {
        let mut groups = vec![DuplicateGroup::exact(vec![file("/a/x", 10), file("/b/x", 10)])];

        let removed: HashSet<PathBuf> = [PathBuf::from("/a/x")].into();
        prune_groups(&mut groups, &removed);

        assert!(groups.is_empty());
    }

    #[test]
    fn test_group_ids_are_unique() {
        let a = DuplicateGroup::exact(vec![file("/a/x", 1), file("/b/x", 1)]);
        let b = DuplicateGroup::exact(vec![file("/a/y", 1), file("/b/y", 1)]);
        assert_ne!(a.id, b.id);
    }
}
