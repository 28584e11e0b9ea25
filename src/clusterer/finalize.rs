//! Exemplar extraction and cluster-size enforcement.
//!
//! The evidence matrix elects exemplars row-wise; views are then assigned
//! to the most similar exemplar (exemplars label themselves). Undersized
//! clusters fold into their nearest neighbour by camera distance as long as
//! the target stays within the maximum; oversized clusters are sliced into
//! maximum-size chunks.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::matrix::MatrixF32;

/// Row-wise exemplar election over the evidence matrix. Ties break towards
/// the lowest column index.
fn elect_centers(evidence: &MatrixF32) -> BTreeSet<usize> {
    let mut centers = BTreeSet::new();
    for i in 0..evidence.n {
        let mut best = f32::NEG_INFINITY;
        let mut arg = 0usize;
        for (j, &e) in evidence.row(i).iter().enumerate() {
            if e > best {
                best = e;
                arg = j;
            }
        }
        centers.insert(arg);
    }
    centers
}

/// Members per center, in ascending member order. An elected exemplar is
/// always its own member; other views join the center with the highest
/// similarity, ties towards the lowest center id.
fn assign_members(sim: &MatrixF32, centers: &BTreeSet<usize>) -> BTreeMap<usize, Vec<usize>> {
    let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..sim.n {
        if centers.contains(&i) {
            clusters.entry(i).or_default().push(i);
            continue;
        }
        let mut best = f32::NEG_INFINITY;
        let mut chosen = None;
        for &c in centers {
            let s = sim.get(i, c);
            if s > best {
                best = s;
                chosen = Some(c);
            }
        }
        if let Some(c) = chosen {
            clusters.entry(c).or_default().push(i);
        }
    }
    clusters
}

/// Folds undersized clusters into the nearest cluster by center camera
/// distance, subject to the combined size staying within `max_size`. A
/// cluster with no viable target is dropped, members included.
fn merge_undersized(
    clusters: &mut BTreeMap<usize, Vec<usize>>,
    view_dists: &MatrixF32,
    x_to_view: &[usize],
    min_size: usize,
    max_size: usize,
) {
    loop {
        let mut changed = false;
        let keys: Vec<usize> = clusters.keys().copied().collect();
        for c in keys {
            let size = match clusters.get(&c) {
                Some(members) if members.len() < min_size => members.len(),
                _ => continue,
            };
            let v1 = x_to_view[c];
            let mut best_dist = f32::INFINITY;
            let mut target = None;
            for (&c2, members2) in clusters.iter() {
                if c2 == c {
                    continue;
                }
                let d = view_dists.get(v1, x_to_view[c2]);
                if d < best_dist && size + members2.len() <= max_size {
                    best_dist = d;
                    target = Some(c2);
                }
            }
            let members = clusters.remove(&c).unwrap_or_default();
            match target {
                Some(t) => {
                    clusters.entry(t).or_default().extend(members);
                    changed = true;
                }
                None => {
                    debug!(
                        "dropping undersized cluster of {} views with no merge target",
                        members.len()
                    );
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// Translates cluster-space ids to view ids and slices oversized clusters
/// into consecutive `max_size` chunks, each chunk sorted ascending.
fn split_oversized(
    clusters: BTreeMap<usize, Vec<usize>>,
    x_to_view: &[usize],
    max_size: usize,
) -> Vec<Vec<usize>> {
    let mut out = Vec::with_capacity(clusters.len());
    for members in clusters.into_values() {
        let ids: Vec<usize> = members.iter().map(|&x| x_to_view[x]).collect();
        for chunk in ids.chunks(max_size) {
            let mut cluster = chunk.to_vec();
            cluster.sort_unstable();
            out.push(cluster);
        }
    }
    out
}

/// Full finalization pass: elect exemplars, assign members, enforce the
/// size bounds, and translate to view ids.
pub fn extract_clusters(
    sim: &MatrixF32,
    evidence: &MatrixF32,
    view_dists: &MatrixF32,
    x_to_view: &[usize],
    min_size: usize,
    max_size: usize,
) -> Vec<Vec<usize>> {
    let centers = elect_centers(evidence);
    debug!("affinity propagation elected {} centers", centers.len());
    let mut clusters = assign_members(sim, &centers);
    merge_undersized(&mut clusters, view_dists, x_to_view, min_size, max_size);
    split_oversized(clusters, x_to_view, max_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evidence matrix whose row-wise argmax is the given exemplar per row.
    fn evidence_for(n: usize, exemplar_of: &[usize]) -> MatrixF32 {
        let mut e = MatrixF32::zeros(n);
        for (i, &c) in exemplar_of.iter().enumerate() {
            e.set(i, c, 1.0);
        }
        e
    }

    #[test]
    fn oversized_cluster_splits_into_chunks() {
        let n = 8;
        let sim = MatrixF32::zeros(n);
        let evidence = evidence_for(n, &[0; 8]);
        let dists = MatrixF32::zeros(n);
        let x_to_view: Vec<usize> = (0..n).collect();

        let clusters = extract_clusters(&sim, &evidence, &dists, &x_to_view, 2, 3);
        let sizes: Vec<usize> = clusters.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2]);
        assert_eq!(clusters[0], vec![0, 1, 2]);
        assert_eq!(clusters[1], vec![3, 4, 5]);
        assert_eq!(clusters[2], vec![6, 7]);
    }

    #[test]
    fn unit_bounds_yield_singletons() {
        let n = 5;
        let sim = MatrixF32::zeros(n);
        let evidence = evidence_for(n, &[0; 5]);
        let dists = MatrixF32::zeros(n);
        let x_to_view: Vec<usize> = (0..n).collect();

        let clusters = extract_clusters(&sim, &evidence, &dists, &x_to_view, 1, 1);
        assert_eq!(clusters.len(), n);
        for (i, c) in clusters.iter().enumerate() {
            assert_eq!(c, &vec![i]);
        }
    }

    #[test]
    fn undersized_cluster_merges_into_nearest_neighbour() {
        // Clusters {0,1,2} and {3}; the singleton fits once max is 4.
        let n = 4;
        let mut sim = MatrixF32::zeros(n);
        sim.set(1, 0, 0.5);
        sim.set(2, 0, 0.5);
        let evidence = evidence_for(n, &[0, 0, 0, 3]);
        let mut dists = MatrixF32::zeros(n);
        dists.set(3, 0, 8.0);
        dists.set(0, 3, 8.0);
        let x_to_view: Vec<usize> = (0..n).collect();

        let clusters = extract_clusters(&sim, &evidence, &dists, &x_to_view, 2, 4);
        assert_eq!(clusters, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn unmergeable_fragment_is_dropped() {
        // Same layout, but max 3 leaves no room for the singleton.
        let n = 4;
        let mut sim = MatrixF32::zeros(n);
        sim.set(1, 0, 0.5);
        sim.set(2, 0, 0.5);
        let evidence = evidence_for(n, &[0, 0, 0, 3]);
        let mut dists = MatrixF32::zeros(n);
        dists.set(3, 0, 8.0);
        dists.set(0, 3, 8.0);
        let x_to_view: Vec<usize> = (0..n).collect();

        let clusters = extract_clusters(&sim, &evidence, &dists, &x_to_view, 2, 3);
        assert_eq!(clusters, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn subset_ids_translate_to_view_ids() {
        let sim = MatrixF32::zeros(3);
        let evidence = evidence_for(3, &[0, 0, 0]);
        let dists = MatrixF32::zeros(8);
        let x_to_view = vec![5, 6, 7];

        let clusters = extract_clusters(&sim, &evidence, &dists, &x_to_view, 1, 3);
        assert_eq!(clusters, vec![vec![5, 6, 7]]);
    }

    #[test]
    fn exemplars_label_themselves_despite_zero_self_similarity() {
        // Views 0 and 2 are exemplars; view 2's own similarity column is 0,
        // which must not push it onto the foreign center 0.
        let n = 3;
        let mut sim = MatrixF32::zeros(n);
        sim.set(1, 0, 0.4);
        let evidence = evidence_for(n, &[0, 0, 2]);
        let dists = MatrixF32::zeros(n);
        let x_to_view: Vec<usize> = (0..n).collect();

        let clusters = extract_clusters(&sim, &evidence, &dists, &x_to_view, 1, 3);
        assert_eq!(clusters, vec![vec![0, 1], vec![2]]);
    }
}
