//! # Dynamical regime classification
//!
//! Labels the current dynamical regime of a cluster from the first and last values of
//! its [`EvolutionSeries`].
//!
//! ## Rules
//!
//! With `c = r_half / r_core` (concentration ratio), and subscripts `0` / `N` for the
//! first / last snapshot, the rules are evaluated **in order**, the first match wins:
//!
//! 1. `c_N > c_0 · 1.2`          → [`Regime::CoreCollapse`]
//! 2. `r_core,N < r_core,0 · 0.9` → [`Regime::MassSegregation`]
//! 3. `r_tidal,N > r_tidal,0 · 1.1` → [`Regime::Evaporation`]
//! 4. otherwise                  → [`Regime::Equilibrium`]
//!
//! A series shorter than two snapshots gives [`Regime::InsufficientData`]. When `r_core`
//! is zero at either end the concentration ratio is undefined and rule 1 is skipped.
//!
//! The factors are fixed policy constants owned by [`RegimeThresholds`]; the defaults
//! are [`CORE_COLLAPSE_FACTOR`], [`MASS_SEGREGATION_FACTOR`] and [`EVAPORATION_FACTOR`].
//!
//! ## Example
//!
//! ```rust
//! use clusterscope::evolution::EvolutionSeries;
//! use clusterscope::regime::{Regime, RegimeClassifier};
//!
//! let series = EvolutionSeries {
//!     time: vec![0.0, 1.0],
//!     r_core: vec![1.0, 0.5],
//!     r_half: vec![5.0, 5.0],
//!     r_tidal: vec![10.0, 10.0],
//!     ..Default::default()
//! };
//! assert_eq!(RegimeClassifier::default().classify(&series), Regime::CoreCollapse);
//! ```
use std::cmp::Ordering::Greater;
use std::fmt;

use serde::Serialize;

use crate::{
    clusterscope_errors::ClusterScopeError,
    constants::{CORE_COLLAPSE_FACTOR, EVAPORATION_FACTOR, MASS_SEGREGATION_FACTOR, MIN_SNAPSHOTS},
    evolution::EvolutionSeries,
};

/// Dynamical regime of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Regime {
    /// Runaway contraction of the core while the envelope does not follow.
    CoreCollapse,
    /// Core contraction driven by heavy particles sinking to the center.
    MassSegregation,
    /// Expansion of the outer radius: particles are escaping.
    Evaporation,
    /// No significant structural trend.
    Equilibrium,
    /// Fewer than two snapshots.
    InsufficientData,
}

impl Regime {
    /// One-line interpretation of the regime.
    pub fn description(&self) -> &'static str {
        match self {
            Regime::CoreCollapse => "the core contracts while the halo expands (core collapse)",
            Regime::MassSegregation => "the core is contracting (mass segregation)",
            Regime::Evaporation => "the cluster is expanding (evaporation)",
            Regime::Equilibrium => "the cluster remains in virial equilibrium",
            Regime::InsufficientData => "at least two snapshots are needed to follow the evolution",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Regime::CoreCollapse => "CoreCollapse",
            Regime::MassSegregation => "MassSegregation",
            Regime::Evaporation => "Evaporation",
            Regime::Equilibrium => "Equilibrium",
            Regime::InsufficientData => "InsufficientData",
        };
        if f.alternate() {
            write!(f, "{name}: {}", self.description())
        } else {
            write!(f, "{name}")
        }
    }
}

/// Decision factors of the [`RegimeClassifier`].
///
/// Fields
/// -----------------
/// * `collapse_concentration_factor` – growth of `r_half / r_core` that signals core collapse (1.2).
/// * `segregation_core_factor` – shrink of `r_core` that signals mass segregation (0.9).
/// * `evaporation_tidal_factor` – growth of `r_tidal` that signals evaporation (1.1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeThresholds {
    pub collapse_concentration_factor: f64,
    pub segregation_core_factor: f64,
    pub evaporation_tidal_factor: f64,
}

impl RegimeThresholds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RegimeThresholdsBuilder {
        RegimeThresholdsBuilder::new()
    }
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        RegimeThresholds {
            collapse_concentration_factor: CORE_COLLAPSE_FACTOR,
            segregation_core_factor: MASS_SEGREGATION_FACTOR,
            evaporation_tidal_factor: EVAPORATION_FACTOR,
        }
    }
}

impl fmt::Display for RegimeThresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Regime Thresholds")?;
            writeln!(f, "-----------------")?;
            writeln!(
                f,
                "  collapse_concentration_factor = {}   # c_N > c_0 * factor",
                self.collapse_concentration_factor
            )?;
            writeln!(
                f,
                "  segregation_core_factor       = {}   # r_core,N < r_core,0 * factor",
                self.segregation_core_factor
            )?;
            write!(
                f,
                "  evaporation_tidal_factor      = {}   # r_tidal,N > r_tidal,0 * factor",
                self.evaporation_tidal_factor
            )
        } else {
            write!(
                f,
                "collapse={}, segregation={}, evaporation={}",
                self.collapse_concentration_factor,
                self.segregation_core_factor,
                self.evaporation_tidal_factor
            )
        }
    }
}

/// Builder for [`RegimeThresholds`], with validation.
#[derive(Debug, Clone, Default)]
pub struct RegimeThresholdsBuilder {
    thresholds: RegimeThresholds,
}

impl RegimeThresholdsBuilder {
    pub fn new() -> Self {
        Self {
            thresholds: RegimeThresholds::default(),
        }
    }

    pub fn collapse_concentration_factor(mut self, v: f64) -> Self {
        self.thresholds.collapse_concentration_factor = v;
        self
    }
    pub fn segregation_core_factor(mut self, v: f64) -> Self {
        self.thresholds.segregation_core_factor = v;
        self
    }
    pub fn evaporation_tidal_factor(mut self, v: f64) -> Self {
        self.thresholds.evaporation_tidal_factor = v;
        self
    }

    /// Return true iff x is finite and > 0.0.
    #[inline]
    fn finite_gt0(x: f64) -> bool {
        x.is_finite() && x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Finalize the builder.
    ///
    /// Every factor must be finite and strictly positive, otherwise
    /// [`ClusterScopeError::InvalidRegimeThreshold`] is returned.
    pub fn build(self) -> Result<RegimeThresholds, ClusterScopeError> {
        let t = &self.thresholds;
        for (name, value) in [
            ("collapse_concentration_factor", t.collapse_concentration_factor),
            ("segregation_core_factor", t.segregation_core_factor),
            ("evaporation_tidal_factor", t.evaporation_tidal_factor),
        ] {
            if !Self::finite_gt0(value) {
                return Err(ClusterScopeError::InvalidRegimeThreshold(format!(
                    "{name} must be finite and > 0 (got {value})"
                )));
            }
        }
        Ok(self.thresholds)
    }
}

/// Fixed-threshold regime classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegimeClassifier {
    thresholds: RegimeThresholds,
}

impl RegimeClassifier {
    pub fn new(thresholds: RegimeThresholds) -> Self {
        RegimeClassifier { thresholds }
    }

    pub fn thresholds(&self) -> &RegimeThresholds {
        &self.thresholds
    }

    /// Classify the regime of a series.
    ///
    /// Only the first and last entries of `r_core`, `r_half` and `r_tidal` are read, each
    /// column from its own ends.
    ///
    /// Return
    /// ----------
    /// * [`Regime::InsufficientData`] when any of those columns holds fewer than two
    ///   entries, otherwise the first matching rule (see the [module documentation](crate::regime)).
    pub fn classify(&self, series: &EvolutionSeries) -> Regime {
        let (Some((rc0, rc_n)), Some((rh0, rh_n)), Some((rt0, rt_n))) = (
            ends(&series.r_core),
            ends(&series.r_half),
            ends(&series.r_tidal),
        ) else {
            return Regime::InsufficientData;
        };
        let t = &self.thresholds;

        if rc0 != 0.0 && rc_n != 0.0 {
            let c0 = rh0 / rc0;
            let c_n = rh_n / rc_n;
            if c_n > c0 * t.collapse_concentration_factor {
                return Regime::CoreCollapse;
            }
        }

        if rc_n < rc0 * t.segregation_core_factor {
            Regime::MassSegregation
        } else if rt_n > rt0 * t.evaporation_tidal_factor {
            Regime::Evaporation
        } else {
            Regime::Equilibrium
        }
    }
}

/// First and last values of a column holding at least [`MIN_SNAPSHOTS`] entries.
fn ends(column: &[f64]) -> Option<(f64, f64)> {
    if column.len() < MIN_SNAPSHOTS {
        return None;
    }
    Some((*column.first()?, *column.last()?))
}

/// Classify a series with the default thresholds.
pub fn classify(series: &EvolutionSeries) -> Regime {
    RegimeClassifier::default().classify(series)
}
