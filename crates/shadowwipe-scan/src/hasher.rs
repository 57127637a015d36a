//! Parallel BLAKE3 content hashing.
//!
//! Partial hashing reads just the first and last 64 KiB, which eliminates
//! most false positives from the size buckets at a small fraction of the
//! I/O cost. Files that still collide get a full-content hash to confirm.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use rayon::prelude::*;

use shadowwipe_core::{CancelToken, FileInfo, ScanError};

/// Chunk read from each end of the file for the partial digest.
const PARTIAL_CHUNK_SIZE: usize = 64 * 1024;

/// Read buffer for full-content hashing.
const FULL_BUFFER_SIZE: usize = 1024 * 1024;

/// Compute partial hashes for every candidate in parallel.
///
/// Output order matches input order. A file that cannot be read keeps an
/// empty hash and is dropped by the next grouping pass; the stage itself
/// fails only on cancellation.
pub fn partial_hash(
    files: Vec<FileInfo>,
    cancel: &CancelToken,
) -> Result<Vec<FileInfo>, ScanError> {
    let files: Vec<FileInfo> = files
        .into_par_iter()
        .map(|mut file| {
            if cancel.is_cancelled() {
                return file;
            }
            if let Ok(digest) = compute_partial_hash(&file.path, file.size) {
                file.partial_hash = digest;
            }
            file
        })
        .collect();

    if cancel.is_cancelled() {
        return Err(ScanError::Cancelled);
    }
    Ok(files)
}

/// Compute full-content hashes for every candidate in parallel.
///
/// Same scaffold and failure semantics as [`partial_hash`].
pub fn full_hash(files: Vec<FileInfo>, cancel: &CancelToken) -> Result<Vec<FileInfo>, ScanError> {
    let files: Vec<FileInfo> = files
        .into_par_iter()
        .map(|mut file| {
            if cancel.is_cancelled() {
                return file;
            }
            if let Ok(digest) = compute_full_hash(&file.path) {
                file.full_hash = digest;
            }
            file
        })
        .collect();

    if cancel.is_cancelled() {
        return Err(ScanError::Cancelled);
    }
    Ok(files)
}

/// BLAKE3 of the first and last 64 KiB, fed to one hash state in that
/// order. Files no larger than the two chunks combined are hashed whole.
fn compute_partial_hash(path: &Path, size: u64) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buf = vec![0u8; PARTIAL_CHUNK_SIZE];

    if size <= (2 * PARTIAL_CHUNK_SIZE) as u64 {
        loop {
            let read = file.read(&mut buf)?;
            if read == 0 {
                break;
            }
            hasher.update(&buf[..read]);
        }
    } else {
        file.read_exact(&mut buf)?;
        hasher.update(&buf);

        file.seek(SeekFrom::End(-(PARTIAL_CHUNK_SIZE as i64)))?;
        file.read_exact(&mut buf)?;
        hasher.update(&buf);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// BLAKE3 of the entire file via a streaming 1 MiB buffer.
fn compute_full_hash(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buf = vec![0u8; FULL_BUFFER_SIZE];

    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}
