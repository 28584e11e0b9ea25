//! Parameter types configuring the clustering stages.
//!
//! Defaults target normalized clouds (unit mean nearest-neighbour distance)
//! and converge on scenes of a few hundred views. For tuning, start with
//! the voxel edge and the damping.

use serde::Deserialize;
use std::f32::consts::FRAC_PI_6;

/// Pipeline-wide parameters controlling preconditioning and the
/// affinity-propagation solver.
///
/// Cluster-size bounds are not part of the bundle; they are passed per
/// clustering invocation.
#[derive(Clone, Debug, Deserialize)]
pub struct ClusterParams {
    /// Cubic voxel edge used by the downsampler, in normalized units.
    pub voxel_size: f32,
    /// Denominator `2σ²` of the angular falloff `exp(-θ²/…)` in the
    /// coverage term.
    pub angle_sigma_2: f32,
    /// Number of affinity-propagation sweeps.
    pub iterations: usize,
    /// Damping λ in [0, 1): convex blend with the previous iterate.
    pub damping: f32,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            voxel_size: 0.1,
            // σ = 30° of viewing-direction disagreement.
            angle_sigma_2: 2.0 * FRAC_PI_6 * FRAC_PI_6,
            iterations: 100,
            damping: 0.9,
        }
    }
}
