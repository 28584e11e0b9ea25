use thiserror::Error;

/// Errors surfaced by the clustering pipeline.
///
/// All preconditions are reported to the caller as recoverable failures; no
/// partial clustering is produced on error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClusterError {
    /// A stage required a non-empty population of points or views.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
    /// The voxel edge length must be strictly positive.
    #[error("voxel size must be positive, got {0}")]
    InvalidVoxelSize(f32),
    /// Cluster bounds must satisfy `0 < min <= max`.
    #[error("invalid cluster bounds: min={min} max={max}")]
    InvalidClusterBounds { min: usize, max: usize },
}
