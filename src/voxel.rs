//! Voxel-grid downsampling with view-list propagation.
//!
//! Points are bucketed into cubic cells anchored at the cloud minimum. Each
//! occupied cell emits one point at the member centroid whose view list is
//! the sorted union of the members' lists, and every referenced view records
//! the index of the new point. Cells drain in ascending key order, so output
//! indices (and therefore `view_points`) are deterministic and sorted.

use std::collections::HashMap;

use log::debug;
use nalgebra::Vector3;

use crate::error::ClusterError;
use crate::types::{Point, View};

/// Downsamples `points` on a cubic grid of edge `size`, filling each view's
/// `view_points` with the indices of the surviving points it observed.
pub fn downsample(
    points: &[Point],
    views: &mut [View],
    size: f32,
) -> Result<Vec<Point>, ClusterError> {
    if !(size > 0.0) {
        return Err(ClusterError::InvalidVoxelSize(size));
    }
    if points.is_empty() {
        return Err(ClusterError::EmptyInput("no points to downsample"));
    }

    let mut min = points[0].pos;
    for p in &points[1..] {
        min.x = min.x.min(p.pos.x);
        min.y = min.y.min(p.pos.y);
        min.z = min.z.min(p.pos.z);
    }

    let mut cells: HashMap<(i32, i32, i32), Vec<usize>> = HashMap::new();
    for (i, p) in points.iter().enumerate() {
        let key = (
            ((p.pos.x - min.x) / size).floor() as i32,
            ((p.pos.y - min.y) / size).floor() as i32,
            ((p.pos.z - min.z) / size).floor() as i32,
        );
        cells.entry(key).or_default().push(i);
    }

    let mut keys: Vec<(i32, i32, i32)> = cells.keys().copied().collect();
    keys.sort_unstable();

    let mut out = Vec::with_capacity(cells.len());
    for key in keys {
        let members = &cells[&key];
        let mut pos = Vector3::zeros();
        let mut view_list: Vec<usize> = Vec::new();
        for &m in members {
            pos += points[m].pos;
            view_list.extend_from_slice(&points[m].view_list);
        }
        pos /= members.len() as f32;
        view_list.sort_unstable();
        view_list.dedup();

        for &vid in &view_list {
            views[vid].view_points.push(out.len());
        }
        out.push(Point { pos, view_list });
    }

    debug!(
        "voxel filter: {} -> {} points (edge {size})",
        points.len(),
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, y: f32, z: f32, views: &[usize]) -> Point {
        Point::new(Vector3::new(x, y, z), views.to_vec())
    }

    #[test]
    fn rejects_non_positive_edge() {
        let points = vec![point(0.0, 0.0, 0.0, &[0])];
        let mut views = vec![View::new(Vector3::zeros())];
        assert!(matches!(
            downsample(&points, &mut views, 0.0),
            Err(ClusterError::InvalidVoxelSize(_))
        ));
        assert!(matches!(
            downsample(&points, &mut views, -1.0),
            Err(ClusterError::InvalidVoxelSize(_))
        ));
    }

    #[test]
    fn rejects_empty_cloud() {
        let mut views = vec![View::new(Vector3::zeros())];
        assert!(matches!(
            downsample(&[], &mut views, 0.5),
            Err(ClusterError::EmptyInput(_))
        ));
    }

    #[test]
    fn colocated_points_merge_into_their_centroid() {
        let points = vec![
            point(0.0, 0.0, 0.0, &[0]),
            point(0.01, 0.0, 0.0, &[0]),
            point(0.02, 0.0, 0.0, &[1]),
            point(1.0, 0.0, 0.0, &[1]),
        ];
        let mut views = vec![View::new(Vector3::zeros()), View::new(Vector3::x())];
        let out = downsample(&points, &mut views, 0.5).expect("downsample");

        assert_eq!(out.len(), 2);
        assert!((out[0].pos - Vector3::new(0.01, 0.0, 0.0)).norm() < 1e-6);
        assert!((out[1].pos - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
        assert_eq!(out[0].view_list, vec![0, 1]);
        assert_eq!(out[1].view_list, vec![1]);
        assert_eq!(views[0].view_points, vec![0]);
        assert_eq!(views[1].view_points, vec![0, 1]);
    }

    #[test]
    fn output_never_grows_and_view_lists_stay_subsets() {
        let points = vec![
            point(0.0, 0.0, 0.0, &[0, 2]),
            point(0.1, 0.1, 0.0, &[1]),
            point(5.0, 5.0, 5.0, &[2]),
        ];
        let mut views = vec![
            View::new(Vector3::zeros()),
            View::new(Vector3::x()),
            View::new(Vector3::y()),
        ];
        let out = downsample(&points, &mut views, 1.0).expect("downsample");

        assert!(out.len() <= points.len());
        for p in &out {
            for &v in &p.view_list {
                assert!(v < views.len());
            }
            assert!(p.view_list.windows(2).all(|w| w[0] < w[1]));
        }
        for v in &views {
            assert!(v.view_points.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
