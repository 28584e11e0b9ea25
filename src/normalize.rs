//! Point-cloud normalization: translate to the centroid and scale so the
//! mean nearest-neighbour distance becomes 1.
//!
//! Normalization makes the voxel edge a scale-free parameter and keeps the
//! exponential kernels of the similarity stage well conditioned. The
//! transform is invertible; [`denormalize`] restores input coordinates.

use log::debug;
use nalgebra::Vector3;

use crate::error::ClusterError;
use crate::spatial::NearestNeighbours;
use crate::types::{Point, View};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Centroid/scale transform mapping the input cloud into normalized space.
#[derive(Clone, Copy, Debug)]
pub struct NormTransform {
    pub centre: Vector3<f32>,
    pub scale: f32,
}

/// Centres points and camera positions on the cloud centroid and scales so
/// the mean nearest-neighbour distance is 1.
///
/// A single-point cloud has no neighbour pairs; it is centred and kept at
/// unit scale.
pub fn normalize(
    points: &mut [Point],
    views: &mut [View],
) -> Result<NormTransform, ClusterError> {
    if points.is_empty() {
        return Err(ClusterError::EmptyInput("no points to normalize"));
    }
    let num = points.len();
    let centre = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.pos)
        / num as f32;

    let scale = if num < 2 {
        1.0
    } else {
        let index = NearestNeighbours::build(points);
        #[cfg(feature = "parallel")]
        let total: f32 = (0..num)
            .into_par_iter()
            .filter_map(|i| index.nearest_other_distance(i, &points[i].pos))
            .sum();
        #[cfg(not(feature = "parallel"))]
        let total: f32 = (0..num)
            .filter_map(|i| index.nearest_other_distance(i, &points[i].pos))
            .sum();
        let avg = total / num as f32;
        if avg > 0.0 {
            1.0 / avg
        } else {
            1.0
        }
    };
    debug!(
        "normalize: centre=({:.4}, {:.4}, {:.4}) scale={:.6}",
        centre.x, centre.y, centre.z, scale
    );

    for p in points.iter_mut() {
        p.pos = (p.pos - centre) * scale;
    }
    for v in views.iter_mut() {
        v.trans = (v.trans - centre) * scale;
    }
    Ok(NormTransform { centre, scale })
}

/// Inverse of [`normalize`]: maps positions back to input coordinates.
pub fn denormalize(points: &mut [Point], views: &mut [View], transform: &NormTransform) {
    let inv = 1.0 / transform.scale;
    for p in points.iter_mut() {
        p.pos = p.pos * inv + transform.centre;
    }
    for v in views.iter_mut() {
        v.trans = v.trans * inv + transform.centre;
    }
}
