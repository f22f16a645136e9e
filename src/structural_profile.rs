//! # Structural profile of a snapshot
//!
//! Computes the radial, kinematic and density summary of one [`Snapshot`]:
//!
//! | Metric         | Definition                                                          |
//! |----------------|---------------------------------------------------------------------|
//! | `r_core`       | radius enclosing the innermost 10 % of particles                    |
//! | `r_half`       | radius enclosing the innermost 50 % (unweighted half-mass proxy)    |
//! | `r_tidal`      | radius enclosing the innermost 90 % (outer radius proxy)            |
//! | `v_mean`       | mean speed                                                          |
//! | `v_std`        | population standard deviation of the speed                          |
//! | `density_core` | particles strictly inside `r_core` per unit volume of that sphere   |
//! | `r_max`        | largest radius                                                      |
//! | `r_mean`       | mean radius                                                         |
//!
//! ## Percentiles
//! -----------------
//! Radii are selected with a **nearest-rank** rule on the ascending radius array:
//! `index = floor(p · n)`, clamped to `n − 1`. No interpolation is performed, so the
//! radii are always actual particle radii and `r_core ≤ r_half ≤ r_tidal ≤ r_max` holds
//! by construction.
//!
//! ## Frame
//! -----------------
//! Radii are measured from the origin. The snapshot is **not** recentered on its
//! center of mass or density centroid; if the cluster center drifts, the radii are
//! biased accordingly.
use std::cmp::Ordering;
use std::f64::consts::PI;

use serde::Serialize;

use crate::{
    clusterscope_errors::ClusterScopeError,
    constants::{Radius, Speed, CORE_FRACTION, HALF_FRACTION, TIDAL_FRACTION},
    snapshot::Snapshot,
};

/// Per-snapshot structural metrics.
///
/// See the [module documentation](crate::structural_profile) for the definition of
/// every field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StructuralMetrics {
    pub r_core: Radius,
    pub r_half: Radius,
    pub r_tidal: Radius,
    pub v_mean: Speed,
    pub v_std: Speed,
    pub density_core: f64,
    pub r_max: Radius,
    pub r_mean: Radius,
}

impl StructuralMetrics {
    /// Concentration ratio `r_half / r_core`, or `None` for a zero core radius.
    pub fn concentration(&self) -> Option<f64> {
        (self.r_core != 0.0).then(|| self.r_half / self.r_core)
    }
}

/// Nearest-rank percentile on an ascending slice.
///
/// Arguments
/// -----------------
/// * `sorted`: Values in ascending order.
/// * `fraction`: Percentile position in `[0, 1]`.
///
/// Return
/// ----------
/// * `sorted[floor(fraction · n)]`, with the index clamped to `n − 1`.
/// * `None` for an empty slice.
#[inline]
pub fn nearest_rank(sorted: &[f64], fraction: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let k = (fraction * sorted.len() as f64).floor() as usize;
    sorted.get(k.min(last)).copied()
}

/// Ascending order with every NaN last, whatever its sign bit.
fn nan_last(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Arithmetic mean and population standard deviation (divisor `n`).
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Number density inside the core sphere.
///
/// Counts radii strictly below `r_core` and divides by `(4/3)·π·r_core³`.
/// A vanishing volume (including `r_core == 0`) yields `0.0`.
fn core_density(radii: &[f64], r_core: Radius) -> f64 {
    let volume = 4.0 / 3.0 * PI * r_core.powi(3);
    if volume > 0.0 {
        let n_core = radii.iter().filter(|&&r| r < r_core).count();
        n_core as f64 / volume
    } else {
        0.0
    }
}

/// Compute the [`StructuralMetrics`] of a snapshot.
///
/// The function is pure: it only reads the particle table.
///
/// Arguments
/// -----------------
/// * `snapshot`: A parsed snapshot.
///
/// Return
/// ----------
/// * The metrics, or [`ClusterScopeError::EmptySnapshot`] when no particle was parsed.
///
/// See also
/// ------------
/// * [`nearest_rank`] – Percentile rule used for the structural radii.
pub fn profile(snapshot: &Snapshot) -> Result<StructuralMetrics, ClusterScopeError> {
    if snapshot.particles.is_empty() {
        return Err(ClusterScopeError::EmptySnapshot);
    }

    let radii: Vec<Radius> = snapshot.particles.iter().map(|p| p.radius()).collect();
    let speeds: Vec<Speed> = snapshot.particles.iter().map(|p| p.speed()).collect();

    let mut sorted = radii.clone();
    sorted.sort_by(nan_last);

    let rank = |fraction| {
        nearest_rank(&sorted, fraction).ok_or(ClusterScopeError::EmptySnapshot)
    };
    let r_core = rank(CORE_FRACTION)?;
    let r_half = rank(HALF_FRACTION)?;
    let r_tidal = rank(TIDAL_FRACTION)?;

    let (v_mean, v_std) = mean_and_std(&speeds);
    let (r_mean, _) = mean_and_std(&radii);

    Ok(StructuralMetrics {
        r_core,
        r_half,
        r_tidal,
        v_mean,
        v_std,
        density_core: core_density(&radii, r_core),
        r_max: sorted[sorted.len() - 1],
        r_mean,
    })
}
