//! Scan configuration and its on-disk persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Unit for the minimum-size setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeUnit {
    #[default]
    #[serde(rename = "KB")]
    Kb,
    #[serde(rename = "MB")]
    Mb,
}

impl SizeUnit {
    /// Multiplier from the numeric setting to bytes.
    pub fn bytes(self) -> u64 {
        match self {
            SizeUnit::Kb => 1024,
            SizeUnit::Mb => 1024 * 1024,
        }
    }
}

/// User-configurable scan parameters.
///
/// Read once at scan start and immutable for the duration of a scan.
/// Persisted to disk so the app reopens exactly where the user left off.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct ScanSettings {
    /// Root directories to scan.
    #[builder(default)]
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Numeric portion of the minimum file size.
    #[builder(default = "0")]
    #[serde(default)]
    pub min_file_size: u64,

    /// Unit applied to `min_file_size`.
    #[builder(default)]
    #[serde(default)]
    pub min_file_size_unit: SizeUnit,

    /// Directory base names whose subtrees are pruned during the walk.
    #[builder(default = "default_excluded_dirs()")]
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,

    /// Hamming distance threshold for perceptual clustering; 0 disables it.
    #[builder(default = "0.0")]
    #[serde(default)]
    pub similarity_threshold: f64,

    /// Skip entries whose base name begins with a dot.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub skip_hidden: bool,
}

fn default_true() -> bool {
    true
}

fn default_excluded_dirs() -> Vec<String> {
    [
        ".git",
        ".svn",
        ".hg",
        "node_modules",
        "vendor",
        "__pycache__",
        ".DS_Store",
        "Thumbs.db",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            min_file_size: 0,
            min_file_size_unit: SizeUnit::Kb,
            excluded_dirs: default_excluded_dirs(),
            similarity_threshold: 0.0,
            skip_hidden: true,
        }
    }
}

impl ScanSettings {
    /// Create a new settings builder.
    pub fn builder() -> ScanSettingsBuilder {
        ScanSettingsBuilder::default()
    }

    /// The configured minimum size converted to bytes.
    pub fn min_file_size_bytes(&self) -> u64 {
        self.min_file_size * self.min_file_size_unit.bytes()
    }

    /// Minimum size actually applied by the walker.
    ///
    /// Forced to at least 1 so zero-byte files are never candidates.
    pub fn effective_min_size(&self) -> u64 {
        self.min_file_size_bytes().max(1)
    }

    /// Path of the settings file under the user config directory.
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ShadowWipe").join("settings.json"))
    }

    /// Load persisted settings, falling back to defaults when the config
    /// directory is unavailable or the file is missing or corrupt.
    pub fn load() -> Self {
        Self::settings_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from an explicit path; defaults on any failure.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist to the default settings path, creating parent directories.
    pub fn save(&self) -> io::Result<()> {
        let path = Self::settings_path()
            .ok_or_else(|| io::Error::other("no user config directory"))?;
        self.save_to(&path)
    }

    /// Persist to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, contents)
    }
}
