//! # Aggregation parameters
//!
//! [`AggregationParams`] decides which data-quality findings of the
//! [`EvolutionAggregator`](crate::evolution::EvolutionAggregator) stay non-fatal anomalies
//! and which become hard errors.
//!
//! ## Example
//!
//! ```rust
//! use clusterscope::evolution::AggregationParams;
//!
//! let params = AggregationParams::builder()
//!     .strict_particle_count(true)
//!     .flag_truncated(false)
//!     .build()
//!     .unwrap();
//! assert!(!params.strict_time_order);
//! ```
use std::fmt;

use crate::clusterscope_errors::ClusterScopeError;

/// Policy switches for snapshot aggregation.
///
/// Fields
/// -----------------
/// * `strict_time_order` – fail with [`ClusterScopeError::NonMonotonicTime`] instead of
///   recording an anomaly when a snapshot time does not increase.
/// * `strict_particle_count` – fail with [`ClusterScopeError::ParticleCountMismatch`] instead
///   of recording an anomaly when the declared particle count changes.
/// * `flag_truncated` – record a `TruncatedSnapshot` anomaly when fewer particle lines
///   were parsed than declared.
///
/// Defaults
/// -----------------
/// Both strict flags are off (upstream simulators occasionally restart numbering, which
/// must not abort a report) and truncation is flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationParams {
    pub strict_time_order: bool,
    pub strict_particle_count: bool,
    pub flag_truncated: bool,
}

impl AggregationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AggregationParamsBuilder {
        AggregationParamsBuilder::new()
    }
}

impl Default for AggregationParams {
    fn default() -> Self {
        AggregationParams {
            strict_time_order: false,
            strict_particle_count: false,
            flag_truncated: true,
        }
    }
}

/// Builder for [`AggregationParams`].
#[derive(Debug, Clone, Default)]
pub struct AggregationParamsBuilder {
    params: AggregationParams,
}

impl AggregationParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: AggregationParams::default(),
        }
    }

    pub fn strict_time_order(mut self, v: bool) -> Self {
        self.params.strict_time_order = v;
        self
    }
    pub fn strict_particle_count(mut self, v: bool) -> Self {
        self.params.strict_particle_count = v;
        self
    }
    pub fn flag_truncated(mut self, v: bool) -> Self {
        self.params.flag_truncated = v;
        self
    }

    /// Finalize the builder. Every combination of switches is valid.
    pub fn build(self) -> Result<AggregationParams, ClusterScopeError> {
        Ok(self.params)
    }
}

impl fmt::Display for AggregationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Aggregation Parameters")?;
            writeln!(f, "----------------------")?;
            writeln!(f, "  strict_time_order     = {}", self.strict_time_order)?;
            writeln!(f, "  strict_particle_count = {}", self.strict_particle_count)?;
            write!(f, "  flag_truncated        = {}", self.flag_truncated)
        } else {
            write!(
                f,
                "strict_time_order={}, strict_particle_count={}, flag_truncated={}",
                self.strict_time_order, self.strict_particle_count, self.flag_truncated
            )
        }
    }
}
