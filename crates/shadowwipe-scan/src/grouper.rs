//! Pure grouping reducers between pipeline stages.
//!
//! No I/O and no concurrency here: each stage hands its output through one
//! of these reducers, which discard every file that can no longer be part
//! of a duplicate group.

use indexmap::IndexMap;

use shadowwipe_core::FileInfo;

/// Bucket files by size, dropping buckets with fewer than two members.
///
/// Files with a unique size cannot be duplicates.
pub fn group_by_size(files: Vec<FileInfo>) -> IndexMap<u64, Vec<FileInfo>> {
    let mut groups: IndexMap<u64, Vec<FileInfo>> = IndexMap::new();
    for file in files {
        groups.entry(file.size).or_default().push(file);
    }
    groups.retain(|_, group| group.len() >= 2);
    groups
}

/// Bucket files by an extracted hash key.
///
/// Files whose key is empty (the hashing stage could not read them) are
/// excluded entirely; buckets with fewer than two members are dropped.
pub fn group_by_hash<F>(files: Vec<FileInfo>, key: F) -> IndexMap<String, Vec<FileInfo>>
where
    F: Fn(&FileInfo) -> &str,
{
    let mut groups: IndexMap<String, Vec<FileInfo>> = IndexMap::new();
    for file in files {
        let hash = key(&file).to_string();
        if hash.is_empty() {
            continue;
        }
        groups.entry(hash).or_default().push(file);
    }
    groups.retain(|_, group| group.len() >= 2);
    groups
}

/// Collect every surviving file into a flat candidate list for the next
/// stage.
pub fn flatten<K>(groups: IndexMap<K, Vec<FileInfo>>) -> Vec<FileInfo> {
    groups.into_values().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;
    use std::path::PathBuf;

    fn file(path: &str, size: u64, partial: &str) -> FileInfo {
        FileInfo {
            path: PathBuf::from(path),
            name: CompactString::new(path.rsplit('/').next().unwrap()),
            extension: CompactString::default(),
            size,
            modified: 0,
            partial_hash: partial.to_string(),
            full_hash: String::new(),
            perceptual_hash: String::new(),
        }
    }

    #[test]
    fn test_group_by_size_drops_singletons() {
        let files = vec![
            file("/a", 10, ""),
            file("/b", 10, ""),
            file("/c", 20, ""),
        ];

        let groups = group_by_size(files);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&10].len(), 2);
    }

    #[test]
    fn test_group_by_hash_drops_empty_keys_and_singletons() {
        let files = vec![
            file("/a", 10, "aaaa"),
            file("/b", 10, "aaaa"),
            file("/c", 10, "bbbb"),
            file("/d", 10, ""),
            file("/e", 10, ""),
        ];

        let groups = group_by_hash(files, |f| f.partial_hash.as_str());

        // Empty keys are excluded before bucketing, so the two unreadable
        // files never form a group of their own.
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["aaaa"].len(), 2);
    }

    #[test]
    fn test_flatten_keeps_all_survivors() {
        let files = vec![
            file("/a", 10, ""),
            file("/b", 10, ""),
            file("/c", 20, ""),
            file("/d", 20, ""),
        ];

        let flat = flatten(group_by_size(files));
        assert_eq!(flat.len(), 4);
    }
}
