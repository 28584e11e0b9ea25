#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod clusterer;
pub mod config;
pub mod error;
pub mod export;
pub mod types;

// “Expert” modules – still public, but considered unstable internals.
pub mod ap;
pub mod matrix;
pub mod normalize;
pub mod similarity;
pub mod spatial;
pub mod voxel;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + parameters.
pub use crate::clusterer::{ClusterParams, ViewClusterer};
pub use crate::error::ClusterError;
pub use crate::types::{Point, View};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use view_clusterer::prelude::*;
/// use nalgebra::Vector3;
///
/// # fn main() -> Result<(), ClusterError> {
/// let points = vec![Point::new(Vector3::new(0.0, 0.0, 1.0), vec![0, 1])];
/// let views = vec![View::new(Vector3::zeros()), View::new(Vector3::x())];
///
/// let mut clusterer = ViewClusterer::new(ClusterParams::default());
/// clusterer.load(points, views);
/// clusterer.compute_information()?;
/// clusterer.cluster_views(2, 8)?;
/// println!("{} clusters", clusterer.final_clusters().len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::error::ClusterError;
    pub use crate::types::{Point, View};
    pub use crate::{ClusterParams, ViewClusterer};
}
