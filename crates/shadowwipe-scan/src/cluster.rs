//! Hamming-distance clustering of perceptual hashes.

use shadowwipe_core::{DuplicateGroup, FileInfo};

/// Greedy single-pass clustering of files by perceptual hash.
///
/// Files without a parseable hash are dropped up front. Walking the
/// candidates in order, each unclaimed file seeds a group and claims every
/// later unclaimed file within `threshold` bits of the seed, so a file
/// never lands in two groups and the earliest index wins membership. The
/// seed itself is only claimed when its group actually forms.
///
/// O(n^2) pairs, which is acceptable for the image candidates that reach
/// this stage.
pub fn cluster_similar(files: &[FileInfo], threshold: u32) -> Vec<DuplicateGroup> {
    let candidates: Vec<(&FileInfo, u64)> = files
        .iter()
        .filter(|file| !file.perceptual_hash.is_empty())
        .filter_map(|file| {
            u64::from_str_radix(&file.perceptual_hash, 16)
                .ok()
                .map(|hash| (file, hash))
        })
        .collect();

    let mut used = vec![false; candidates.len()];
    let mut groups = Vec::new();

    for i in 0..candidates.len() {
        if used[i] {
            continue;
        }

        let (seed, seed_hash) = candidates[i];
        let mut members = vec![seed.clone()];

        for j in (i + 1)..candidates.len() {
            if used[j] {
                continue;
            }
            let (file, hash) = candidates[j];
            if hamming(seed_hash, hash) <= threshold {
                members.push(file.clone());
                used[j] = true;
            }
        }

        if members.len() >= 2 {
            used[i] = true;
            groups.push(DuplicateGroup::similar(members, similarity_for(threshold)));
        }
    }

    groups
}

/// Coarse similarity percentage reported for a threshold.
fn similarity_for(threshold: u32) -> f64 {
    100.0 - f64::from(threshold)
}

fn hamming(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}
