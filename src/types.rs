use nalgebra::Vector3;

/// A sparse scene point together with the views that observed it.
#[derive(Clone, Debug)]
pub struct Point {
    pub pos: Vector3<f32>,
    /// Indices of the observing views; sorted ascending, deduplicated.
    pub view_list: Vec<usize>,
}

impl Point {
    pub fn new(pos: Vector3<f32>, mut view_list: Vec<usize>) -> Self {
        view_list.sort_unstable();
        view_list.dedup();
        Self { pos, view_list }
    }
}

/// A calibrated camera, identified by its index in the view set.
#[derive(Clone, Debug)]
pub struct View {
    /// Camera-centre position.
    pub trans: Vector3<f32>,
    /// Indices of the downsampled points this view observed; sorted
    /// ascending. Populated by the voxel filter.
    pub view_points: Vec<usize>,
}

impl View {
    pub fn new(trans: Vector3<f32>) -> Self {
        Self {
            trans,
            view_points: Vec::new(),
        }
    }
}
