//! Thumbnail generation and caching for the host UI.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

/// Longest edge of a generated thumbnail (retina for an 80px display slot).
const MAX_DIM: u32 = 160;

/// JPEG quality for thumbnail encoding.
const JPEG_QUALITY: u8 = 80;

/// Decode an image, shrink it to fit within [`MAX_DIM`] while preserving
/// aspect ratio, and encode the result as a JPEG data URI.
///
/// Returns an empty string on any error; thumbnails are cosmetic and a
/// missing one must never break the host.
pub fn generate_thumbnail(path: &Path) -> String {
    let Ok(img) = image::open(path) else {
        return String::new();
    };

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return String::new();
    }

    // Only shrink; small images keep their native size.
    let (new_width, new_height) = fit_within(width, height, MAX_DIM);
    let thumb = if (new_width, new_height) == (width, height) {
        rgb
    } else {
        image::imageops::resize(&rgb, new_width, new_height, FilterType::CatmullRom)
    };

    let mut encoded = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY);
    if thumb.write_with_encoder(encoder).is_err() {
        return String::new();
    }

    format!("data:image/jpeg;base64,{}", STANDARD.encode(encoded))
}

/// Dimensions scaled to fit within `max_dim`, preserving aspect ratio and
/// never upscaling.
fn fit_within(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    if width <= max_dim && height <= max_dim {
        return (width, height);
    }
    if width > height {
        let scaled = (u64::from(height) * u64::from(max_dim) / u64::from(width)) as u32;
        (max_dim, scaled.max(1))
    } else {
        let scaled = (u64::from(width) * u64::from(max_dim) / u64::from(height)) as u32;
        (scaled.max(1), max_dim)
    }
}

/// Thread-safe thumbnail cache with a maximum entry count.
///
/// Once full, new entries are dropped rather than evicting old ones; the
/// host clears the cache between scans.
pub struct ThumbnailCache {
    entries: RwLock<HashMap<PathBuf, String>>,
    max_entries: usize,
}

impl ThumbnailCache {
    /// Create a cache holding at most `max_entries` thumbnails.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(max_entries.min(256))),
            max_entries,
        }
    }

    /// Look up a cached data URI.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.entries.read().ok()?.get(path).cloned()
    }

    /// Store a data URI. A full cache ignores the insert.
    pub fn put(&self, path: PathBuf, data_uri: String) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.max_entries {
                return;
            }
            entries.insert(path, data_uri);
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn write_test_image(path: &Path, width: u32, height: u32) {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_generates_jpeg_data_uri() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("photo.png");
        write_test_image(&path, 640, 480);

        let uri = generate_thumbnail(&path);
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert!(uri.len() > "data:image/jpeg;base64,".len());
    }

    #[test]
    fn test_missing_or_broken_files_yield_empty() {
        let temp = TempDir::new().unwrap();
        assert_eq!(generate_thumbnail(&temp.path().join("nope.png")), "");

        let garbage = temp.path().join("garbage.jpg");
        std::fs::write(&garbage, b"not an image").unwrap();
        assert_eq!(generate_thumbnail(&garbage), "");
    }

    #[test]
    fn test_fit_within_preserves_aspect_and_never_upscales() {
        assert_eq!(fit_within(80, 60, 160), (80, 60));
        assert_eq!(fit_within(640, 480, 160), (160, 120));
        assert_eq!(fit_within(480, 640, 160), (120, 160));
        assert_eq!(fit_within(4000, 1, 160), (160, 1));
    }

    #[test]
    fn test_cache_roundtrip_and_clear() {
        let cache = ThumbnailCache::new(8);
        let path = PathBuf::from("/photos/a.jpg");

        assert!(cache.get(&path).is_none());
        cache.put(path.clone(), "data:image/jpeg;base64,abc".into());
        assert_eq!(cache.get(&path).unwrap(), "data:image/jpeg;base64,abc");

        cache.clear();
        assert!(cache.get(&path).is_none());
    }

    #[test]
    fn test_full_cache_drops_inserts() {
        let cache = ThumbnailCache::new(1);
        cache.put(PathBuf::from("/a"), "one".into());
        cache.put(PathBuf::from("/b"), "two".into());

        assert!(cache.get(Path::new("/a")).is_some());
        assert!(cache.get(Path::new("/b")).is_none());
    }
}
