//! Static nearest-neighbour index over scene-point positions.

use nalgebra::Vector3;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::types::Point;

struct IndexedPoint {
    idx: usize,
    pos: [f32; 3],
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.pos)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.pos[0] - point[0];
        let dy = self.pos[1] - point[1];
        let dz = self.pos[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// R*-tree over point positions; built once per cloud, queried many times.
pub struct NearestNeighbours {
    tree: RTree<IndexedPoint>,
}

impl NearestNeighbours {
    pub fn build(points: &[Point]) -> Self {
        let wrapped = points
            .iter()
            .enumerate()
            .map(|(idx, p)| IndexedPoint {
                idx,
                pos: [p.pos.x, p.pos.y, p.pos.z],
            })
            .collect();
        Self {
            tree: RTree::bulk_load(wrapped),
        }
    }

    /// Distance from `pos` to the nearest indexed point other than `i`.
    pub fn nearest_other_distance(&self, i: usize, pos: &Vector3<f32>) -> Option<f32> {
        let query = [pos.x, pos.y, pos.z];
        self.tree
            .nearest_neighbor_iter(&query)
            .find(|p| p.idx != i)
            .map(|p| p.distance_2(&query).sqrt())
    }
}
