use std::collections::HashSet;
use std::path::PathBuf;

use compact_str::CompactString;
use tempfile::TempDir;

use shadowwipe_core::{DuplicateGroup, FileInfo, ScanSettings, SizeUnit, prune_groups};

fn file(path: &str, size: u64) -> FileInfo {
    let path = PathBuf::from(path);
    let name = CompactString::new(path.file_name().unwrap().to_string_lossy());
    FileInfo {
        path,
        name,
        extension: CompactString::new("bin"),
        size,
        modified: 1_700_000_000,
        partial_hash: String::new(),
        full_hash: String::new(),
        perceptual_hash: String::new(),
    }
}

#[test]
fn test_settings_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ShadowWipe").join("settings.json");

    let settings = ScanSettings::builder()
        .paths(vec![PathBuf::from("/home/user/Pictures")])
        .min_file_size(10u64)
        .min_file_size_unit(SizeUnit::Mb)
        .similarity_threshold(8.0)
        .skip_hidden(false)
        .build()
        .unwrap();

    settings.save_to(&path).unwrap();
    let loaded = ScanSettings::load_from(&path);

    assert_eq!(loaded.paths, settings.paths);
    assert_eq!(loaded.min_file_size, 10);
    assert_eq!(loaded.min_file_size_unit, SizeUnit::Mb);
    assert_eq!(loaded.similarity_threshold, 8.0);
    assert!(!loaded.skip_hidden);
    assert_eq!(loaded.excluded_dirs, settings.excluded_dirs);
}

#[test]
fn test_settings_missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let loaded = ScanSettings::load_from(&temp.path().join("nope.json"));

    assert!(loaded.paths.is_empty());
    assert!(loaded.skip_hidden);
}

#[test]
fn test_settings_corrupt_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    std::fs::write(&path, "{not valid json").unwrap();

    let loaded = ScanSettings::load_from(&path);
    assert!(loaded.paths.is_empty());
    assert_eq!(loaded.min_file_size, 0);
}

#[test]
fn test_settings_partial_file_fills_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    std::fs::write(&path, r#"{"min_file_size": 5}"#).unwrap();

    let loaded = ScanSettings::load_from(&path);
    assert_eq!(loaded.min_file_size, 5);
    assert_eq!(loaded.min_file_size_unit, SizeUnit::Kb);
    assert!(loaded.skip_hidden);
    assert!(loaded.excluded_dirs.contains(&"vendor".to_string()));
}

#[test]
fn test_group_json_shape() {
    let group = DuplicateGroup::exact(vec![file("/a/x", 10), file("/b/x", 10)]);
    let json = serde_json::to_value(&group).unwrap();

    assert_eq!(json["kind"], "exact");
    assert_eq!(json["similarity"], 0.0);
    assert_eq!(json["total_size"], 20);
    assert_eq!(json["wasted_size"], 10);
    assert_eq!(json["files"].as_array().unwrap().len(), 2);
    assert_eq!(json["files"][0]["partial_hash"], "");
}

#[test]
fn test_prune_after_partial_trash() {
    let mut groups = vec![
        DuplicateGroup::exact(vec![file("/a/x", 10), file("/b/x", 10), file("/c/x", 10)]),
        DuplicateGroup::exact(vec![file("/d/y", 7), file("/e/y", 7)]),
    ];

    // Trash succeeded for /c/x and /d/y only.
    let removed: HashSet<PathBuf> = [PathBuf::from("/c/x"), PathBuf::from("/d/y")].into();
    prune_groups(&mut groups, &removed);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count(), 2);
    assert_eq!(groups[0].total_size, 20);
    assert_eq!(groups[0].wasted_size, 10);
}
