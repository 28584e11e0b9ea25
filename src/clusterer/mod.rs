//! View-clustering pipeline orchestrating the preconditioning and solver
//! stages.
//!
//! Overview
//! - Normalizes the cloud (centroid translation, mean nearest-neighbour
//!   scale) so every threshold downstream is scale-free.
//! - Downsamples points on a voxel grid, propagating view lists and filling
//!   each view's observed-point index list.
//! - Builds the dense camera-distance matrix, then the similarity matrix
//!   from angular coverage and a logistic distance kernel.
//! - Elects exemplar views with damped affinity propagation and enforces
//!   the requested cluster-size bounds by merging undersized clusters into
//!   their nearest neighbour and slicing oversized ones.
//! - Denormalizes before returning, so callers observe input coordinates.
//!
//! Modules
//! - `pipeline` – the main [`ViewClusterer`] implementation.
//! - `options` – the [`ClusterParams`] knobs.
//! - `finalize` – exemplar extraction and size enforcement.

pub mod options;

mod finalize;
mod pipeline;

pub use options::ClusterParams;
pub use pipeline::ViewClusterer;
