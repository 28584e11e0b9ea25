use log::info;

use crate::ap;
use crate::error::ClusterError;
use crate::matrix::MatrixF32;
use crate::normalize::{self, NormTransform};
use crate::similarity;
use crate::types::{Point, View};
use crate::voxel;

use super::finalize;
use super::options::ClusterParams;

/// View-clustering pipeline over a sparse point cloud and its cameras.
///
/// Call order: [`load`](Self::load) →
/// [`compute_information`](Self::compute_information) →
/// [`cluster_views`](Self::cluster_views) (or
/// [`cluster_views_subset`](Self::cluster_views_subset)) →
/// [`final_clusters`](Self::final_clusters). Clustering denormalizes the
/// geometry before returning, so the stored points and camera centres are
/// back in input coordinates afterwards.
pub struct ViewClusterer {
    params: ClusterParams,
    points: Vec<Point>,
    views: Vec<View>,
    orig_points: Vec<Point>,
    norm: Option<NormTransform>,
    view_dists: MatrixF32,
    final_clusters: Vec<Vec<usize>>,
}

impl ViewClusterer {
    pub fn new(params: ClusterParams) -> Self {
        Self {
            params,
            points: Vec::new(),
            views: Vec::new(),
            orig_points: Vec::new(),
            norm: None,
            view_dists: MatrixF32::zeros(0),
            final_clusters: Vec::new(),
        }
    }

    /// Ingests the input population, replacing any previous state.
    pub fn load(&mut self, points: Vec<Point>, views: Vec<View>) {
        self.points = points;
        self.views = views;
        self.orig_points.clear();
        self.norm = None;
        self.view_dists = MatrixF32::zeros(0);
        self.final_clusters.clear();
    }

    /// Preconditions the cloud: normalization, voxel downsampling and the
    /// dense camera-distance matrix. Must run before clustering.
    pub fn compute_information(&mut self) -> Result<(), ClusterError> {
        if self.views.is_empty() {
            return Err(ClusterError::EmptyInput("no views loaded"));
        }
        let transform = normalize::normalize(&mut self.points, &mut self.views)?;
        self.norm = Some(transform);

        let filtered = voxel::downsample(&self.points, &mut self.views, self.params.voxel_size)?;
        self.orig_points = std::mem::replace(&mut self.points, filtered);

        self.view_dists = similarity::view_distance_matrix(&self.views)?;
        info!(
            "preconditioned {} views over {} points ({} before downsampling)",
            self.views.len(),
            self.points.len(),
            self.orig_points.len()
        );
        Ok(())
    }

    /// Clusters the whole view set into clusters of `min_size..=max_size`
    /// views.
    pub fn cluster_views(&mut self, min_size: usize, max_size: usize) -> Result<(), ClusterError> {
        let x_to_view: Vec<usize> = (0..self.views.len()).collect();
        self.cluster_views_subset(&x_to_view, min_size, max_size)
    }

    /// Clusters a restricted view subset. `x_to_view[x]` is the view id
    /// behind cluster-space index `x`; the resulting clusters contain view
    /// ids.
    pub fn cluster_views_subset(
        &mut self,
        x_to_view: &[usize],
        min_size: usize,
        max_size: usize,
    ) -> Result<(), ClusterError> {
        if max_size == 0 || min_size > max_size {
            return Err(ClusterError::InvalidClusterBounds {
                min: min_size,
                max: max_size,
            });
        }
        if x_to_view.is_empty() {
            return Err(ClusterError::EmptyInput("no views selected for clustering"));
        }
        if self.view_dists.n != self.views.len() || self.views.is_empty() {
            return Err(ClusterError::EmptyInput(
                "no preconditioned views; run compute_information first",
            ));
        }

        let sim = similarity::similarity_matrix(
            &self.points,
            &self.views,
            &self.view_dists,
            x_to_view,
            self.params.angle_sigma_2,
        )?;
        let evidence = ap::propagate(&sim, self.params.iterations, self.params.damping);
        let clusters = finalize::extract_clusters(
            &sim,
            &evidence,
            &self.view_dists,
            x_to_view,
            min_size,
            max_size,
        );
        info!(
            "clustered {} views into {} clusters",
            x_to_view.len(),
            clusters.len()
        );

        if let Some(transform) = self.norm.take() {
            normalize::denormalize(&mut self.points, &mut self.views, &transform);
            normalize::denormalize(&mut self.orig_points, &mut [], &transform);
        }
        self.final_clusters = clusters;
        Ok(())
    }

    /// Clusters from the most recent clustering call, each a sorted list of
    /// view ids.
    pub fn final_clusters(&self) -> &[Vec<usize>] {
        &self.final_clusters
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Snapshot of the cloud as it was before voxel downsampling; retained
    /// for export and debugging.
    pub fn orig_points(&self) -> &[Point] {
        &self.orig_points
    }
}
