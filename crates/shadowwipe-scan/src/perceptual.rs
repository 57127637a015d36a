//! Perceptual hashing of image files.
//!
//! Implements the classic DCT pHash: similar images produce 64-bit
//! fingerprints with a small Hamming distance even when their bytes differ
//! (re-encodes, minor edits, format conversions).

use std::path::Path;

use image::imageops::FilterType;
use rayon::prelude::*;

use shadowwipe_core::{CancelToken, FileInfo, ScanError};

/// Extensions handed to the image decoder.
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

/// Edge length of the downscaled input to the DCT.
const DCT_SIZE: usize = 32;

/// Edge length of the low-frequency block the hash reads.
const BLOCK_SIZE: usize = 8;

/// Whether the perceptual stage will consider this file.
pub fn is_image(file: &FileInfo) -> bool {
    IMAGE_EXTENSIONS.contains(&file.extension.as_str())
}

/// Compute perceptual hashes for image files in parallel.
///
/// Non-image files and files that fail to decode keep an empty hash; the
/// stage fails only on cancellation. Output order matches input order.
pub fn perceptual_hash(
    files: Vec<FileInfo>,
    cancel: &CancelToken,
) -> Result<Vec<FileInfo>, ScanError> {
    let files: Vec<FileInfo> = files
        .into_par_iter()
        .map(|mut file| {
            if cancel.is_cancelled() {
                return file;
            }
            if is_image(&file) {
                if let Some(hash) = compute_phash(&file.path) {
                    file.perceptual_hash = format!("{hash:016x}");
                }
            }
            file
        })
        .collect();

    if cancel.is_cancelled() {
        return Err(ScanError::Cancelled);
    }
    Ok(files)
}

/// Decode and condense an image into a 64-bit fingerprint.
///
/// Grayscale, resize to 32x32, 2-D DCT, then one bit per coefficient of
/// the top-left 8x8 block: set iff the coefficient exceeds the block mean
/// (the DC term is excluded from the mean). Bits are packed row-major,
/// most significant first, so Hamming distances are stable across runs.
fn compute_phash(path: &Path) -> Option<u64> {
    let img = image::open(path).ok()?;
    let gray = image::imageops::resize(
        &img.to_luma8(),
        DCT_SIZE as u32,
        DCT_SIZE as u32,
        FilterType::Triangle,
    );

    let mut pixels = [[0.0f64; DCT_SIZE]; DCT_SIZE];
    for (x, y, pixel) in gray.enumerate_pixels() {
        pixels[y as usize][x as usize] = f64::from(pixel.0[0]);
    }

    let dct = dct_2d(&pixels);

    let mut sum = 0.0;
    for row in dct.iter().take(BLOCK_SIZE) {
        for &coeff in row.iter().take(BLOCK_SIZE) {
            sum += coeff;
        }
    }
    let mean = (sum - dct[0][0]) / (BLOCK_SIZE * BLOCK_SIZE - 1) as f64;

    let mut bits = 0u64;
    for row in dct.iter().take(BLOCK_SIZE) {
        for &coeff in row.iter().take(BLOCK_SIZE) {
            bits = (bits << 1) | u64::from(coeff > mean);
        }
    }
    Some(bits)
}

/// Orthonormal 2-D DCT-II: rows first, then columns.
fn dct_2d(pixels: &[[f64; DCT_SIZE]; DCT_SIZE]) -> [[f64; DCT_SIZE]; DCT_SIZE] {
    let mut rows = [[0.0; DCT_SIZE]; DCT_SIZE];
    for (row, input) in rows.iter_mut().zip(pixels) {
        *row = dct_1d(input);
    }

    let mut out = [[0.0; DCT_SIZE]; DCT_SIZE];
    for x in 0..DCT_SIZE {
        let mut column = [0.0; DCT_SIZE];
        for y in 0..DCT_SIZE {
            column[y] = rows[y][x];
        }
        let transformed = dct_1d(&column);
        for y in 0..DCT_SIZE {
            out[y][x] = transformed[y];
        }
    }
    out
}

fn dct_1d(input: &[f64; DCT_SIZE]) -> [f64; DCT_SIZE] {
    let n = DCT_SIZE as f64;
    let mut output = [0.0; DCT_SIZE];
    for (u, out) in output.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (x, &value) in input.iter().enumerate() {
            sum += value
                * (std::f64::consts::PI * (2.0 * x as f64 + 1.0) * u as f64 / (2.0 * n)).cos();
        }
        let scale = if u == 0 {
            (1.0 / n).sqrt()
        } else {
            (2.0 / n).sqrt()
        };
        *out = sum * scale;
    }
    output
}
