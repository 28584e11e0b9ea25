//! Pairwise view similarity.
//!
//! The similarity of two views is the product of a coverage term — mean
//! angular agreement of the rays towards commonly observed points — and a
//! logistic kernel of the camera distance centred on the median spacing of
//! the compared set. Entries live in [0, 1]; the diagonal stays 0.

use std::cmp::Ordering;

use log::debug;

use crate::error::ClusterError;
use crate::matrix::MatrixF32;
use crate::types::{Point, View};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Dense symmetric matrix of camera-centre distances, zero diagonal.
pub fn view_distance_matrix(views: &[View]) -> Result<MatrixF32, ClusterError> {
    if views.is_empty() {
        return Err(ClusterError::EmptyInput("no views for distance matrix"));
    }
    let n = views.len();
    let mut dists = MatrixF32::zeros(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = (views[i].trans - views[j].trans).norm();
            dists.set(i, j, d);
            dists.set(j, i, d);
        }
    }
    Ok(dists)
}

/// Lower median of the off-diagonal camera distances of the restricted set,
/// symmetry duplicates included.
pub fn distance_median(view_dists: &MatrixF32, x_to_view: &[usize]) -> f32 {
    let n = x_to_view.len();
    let mut dists = Vec::with_capacity(n.saturating_mul(n).saturating_sub(n));
    for (a, &v1) in x_to_view.iter().enumerate() {
        for (b, &v2) in x_to_view.iter().enumerate() {
            if a == b {
                continue;
            }
            dists.push(view_dists.get(v1, v2));
        }
    }
    if dists.is_empty() {
        return 0.0;
    }
    dists.sort_unstable_by(f32::total_cmp);
    dists[dists.len() / 2]
}

/// Sorted-list intersection of two ascending index slices.
fn common_points(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Mean angular agreement over the points both views observe.
///
/// Each common point contributes `exp(-θ² / angle_sigma_2)` where θ is the
/// angle between the unit rays from the point towards the two camera
/// centres. Returns 0 when the views share no points or the mean is not
/// finite.
pub fn view_coverage(points: &[Point], v1: &View, v2: &View, angle_sigma_2: f32) -> f32 {
    let common = common_points(&v1.view_points, &v2.view_points);
    if common.is_empty() {
        return 0.0;
    }
    let mut weight = 0.0f32;
    for &pid in &common {
        let c1 = (v1.trans - points[pid].pos).normalize();
        let c2 = (v2.trans - points[pid].pos).normalize();
        let angle = c1.dot(&c2).clamp(-1.0, 1.0).acos();
        weight += (-(angle * angle) / angle_sigma_2).exp();
    }
    let mean = weight / common.len() as f32;
    if mean.is_finite() {
        mean
    } else {
        0.0
    }
}

/// Logistic kernel of the camera distance, centred on the median spacing.
fn distance_weight(dist: f32, median: f32) -> f32 {
    1.0 / (1.0 + (-(dist - median) / median).exp())
}

/// Dense similarity matrix over the restricted view set.
///
/// `x_to_view[x]` names the view id behind cluster-space index `x`. Any
/// non-finite per-pair product is coerced to 0.
pub fn similarity_matrix(
    points: &[Point],
    views: &[View],
    view_dists: &MatrixF32,
    x_to_view: &[usize],
    angle_sigma_2: f32,
) -> Result<MatrixF32, ClusterError> {
    if x_to_view.is_empty() {
        return Err(ClusterError::EmptyInput("no views to compare"));
    }
    if points.is_empty() {
        return Err(ClusterError::EmptyInput("no points to compare views against"));
    }
    let n = x_to_view.len();
    let median = distance_median(view_dists, x_to_view);
    debug!("similarity: {n} views, median camera distance {median:.4}");

    let mut sim = MatrixF32::zeros(n);
    let fill_row = |a: usize, row: &mut [f32]| {
        let v1 = x_to_view[a];
        for (b, cell) in row.iter_mut().enumerate() {
            let v2 = x_to_view[b];
            if v1 == v2 {
                continue;
            }
            let coverage = view_coverage(points, &views[v1], &views[v2], angle_sigma_2);
            let distance = distance_weight(view_dists.get(v1, v2), median);
            let s = coverage * distance;
            *cell = if s.is_finite() { s } else { 0.0 };
        }
    };
    #[cfg(feature = "parallel")]
    {
        sim.data
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(a, row)| fill_row(a, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        sim.data
            .chunks_mut(n)
            .enumerate()
            .for_each(|(a, row)| fill_row(a, row));
    }
    Ok(sim)
}
