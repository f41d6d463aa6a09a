//! Mutual-best brute-force matching under Hamming distance.

use pano_core::{Descriptors, FeatureMatch};
use rayon::prelude::*;

fn best_against(query_idx: usize, query: &Descriptors, train: &Descriptors) -> Option<(usize, u32)> {
    let q = query.descriptors.get(query_idx)?;
    train
        .iter()
        .enumerate()
        .map(|(idx, t)| (idx, q.hamming_distance(t)))
        .min_by_key(|&(_, dist)| dist)
}

/// One-to-one correspondences where each descriptor is the other's nearest
/// neighbor (cross-check), sorted ascending by distance.
pub fn mutual_best_matches(query: &Descriptors, train: &Descriptors) -> Vec<FeatureMatch> {
    if query.is_empty() || train.is_empty() {
        return Vec::new();
    }

    // Nearest train descriptor for every query, computed independently.
    let forward: Vec<Option<(usize, u32)>> = (0..query.len())
        .into_par_iter()
        .map(|qi| best_against(qi, query, train))
        .collect();

    let backward: Vec<Option<(usize, u32)>> = (0..train.len())
        .into_par_iter()
        .map(|ti| best_against(ti, train, query))
        .collect();

    let mut matches: Vec<FeatureMatch> = forward
        .iter()
        .enumerate()
        .filter_map(|(qi, fwd)| {
            let (ti, dist) = (*fwd)?;
            match backward[ti] {
                Some((back_qi, _)) if back_qi == qi => Some(FeatureMatch::new(qi, ti, dist)),
                _ => None,
            }
        })
        .collect();

    matches.sort_by_key(|m| m.distance);
    matches
}
