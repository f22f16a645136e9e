//! # Evolution: time series across snapshots
//!
//! Builds an [`EvolutionSeries`] from a time-ordered sequence of snapshot sources and
//! records data-quality [`Anomaly`] values alongside it.
//!
//! Pipeline
//! -----------------
//! For each source, in the order given:
//!
//! 1. parse with [`parse_snapshot`],
//! 2. profile with [`profile`],
//! 3. validate against the series built so far and append.
//!
//! The aggregator never re-sorts its input by embedded time. It checks instead that
//! each time is strictly greater than the previously appended one and that every
//! snapshot declares the same particle count as the first. Both findings are
//! **anomalies**: they are logged, recorded with the offending index, and the snapshot
//! is appended as-is. [`AggregationParams`] can promote them to hard errors.
//!
//! Parse and profile failures are returned unchanged to the caller.
//!
//! Modules
//! -----------------
//! * [`aggregation_params`](crate::evolution::aggregation_params) – Strictness switches and builder.
//! * [`summary`](crate::evolution::summary) – Initial/final comparison of the tracked metrics.
//!
//! Example
//! -----------------
//! ```rust
//! use clusterscope::evolution::aggregate;
//!
//! let sources = [
//!     "0\n1\n0.0\n0 1.0 1.0 0.0 0.0 0.0 0.5 0.0\n",
//!     "1\n1\n1.0\n0 1.0 2.0 0.0 0.0 0.0 0.5 0.0\n",
//! ];
//! let evolution = aggregate(&sources).unwrap();
//! assert!(evolution.is_sufficient());
//! assert!(evolution.anomalies.is_empty());
//! assert_eq!(evolution.series.r_core, vec![1.0, 2.0]);
//! ```
use std::cmp::Ordering::Greater;

use camino::Utf8Path;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    clusterscope_errors::ClusterScopeError,
    constants::{Radius, SnapshotId, Speed, Time, MIN_SNAPSHOTS},
    snapshot::{snapshot_reader::parse_snapshot, Snapshot},
    structural_profile::{profile, StructuralMetrics},
};

pub mod aggregation_params;
pub mod summary;

pub use aggregation_params::{AggregationParams, AggregationParamsBuilder};

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Index-aligned time series of the tracked metrics.
///
/// Every vector has the same length, one entry per appended snapshot, in the order
/// the snapshots were supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvolutionSeries {
    pub time: Vec<Time>,
    pub r_core: Vec<Radius>,
    pub r_half: Vec<Radius>,
    pub r_tidal: Vec<Radius>,
    pub v_std: Vec<Speed>,
    pub density_core: Vec<f64>,
    pub n_particles: Vec<usize>,

    pub snapshot_id: Vec<SnapshotId>,
    pub v_mean: Vec<Speed>,
    pub r_max: Vec<Radius>,
    pub r_mean: Vec<Radius>,
}

impl EvolutionSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots in the series.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    fn push(&mut self, snapshot: &Snapshot, metrics: &StructuralMetrics) {
        self.time.push(snapshot.time);
        self.r_core.push(metrics.r_core);
        self.r_half.push(metrics.r_half);
        self.r_tidal.push(metrics.r_tidal);
        self.v_std.push(metrics.v_std);
        self.density_core.push(metrics.density_core);
        self.n_particles.push(snapshot.n_particles);

        self.snapshot_id.push(snapshot.snapshot_id);
        self.v_mean.push(metrics.v_mean);
        self.r_max.push(metrics.r_max);
        self.r_mean.push(metrics.r_mean);
    }

    /// Concentration ratio `r_half / r_core` per snapshot; `None` where `r_core` is zero.
    pub fn concentration(&self) -> Vec<Option<f64>> {
        self.r_half
            .iter()
            .zip(&self.r_core)
            .map(|(&half, &core)| (core != 0.0).then(|| half / core))
            .collect()
    }

    /// Core density relative to the first snapshot.
    ///
    /// Return
    /// ----------
    /// * `None` if the series is empty or the first core density is zero.
    pub fn normalized_density(&self) -> Option<Vec<f64>> {
        let first = *self.density_core.first()?;
        if first == 0.0 {
            return None;
        }
        Some(self.density_core.iter().map(|d| d / first).collect())
    }
}

/// A data-quality finding recorded during aggregation.
///
/// `index` is the position of the offending snapshot in the supplied sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Anomaly {
    /// The snapshot time is not strictly greater than the previous one.
    NonMonotonicTime {
        index: usize,
        previous: Time,
        time: Time,
    },
    /// The declared particle count differs from the first snapshot's.
    ParticleCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// Fewer particle records were parsed than the header declares.
    TruncatedSnapshot {
        index: usize,
        declared: usize,
        parsed: usize,
    },
}

impl Anomaly {
    pub fn index(&self) -> usize {
        match self {
            Anomaly::NonMonotonicTime { index, .. }
            | Anomaly::ParticleCountMismatch { index, .. }
            | Anomaly::TruncatedSnapshot { index, .. } => *index,
        }
    }
}

/// Result of an aggregation: the series and every anomaly met while building it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evolution {
    pub series: EvolutionSeries,
    pub anomalies: Vec<Anomaly>,
}

impl Evolution {
    /// True when the series holds enough snapshots to describe an evolution.
    pub fn is_sufficient(&self) -> bool {
        self.series.len() >= MIN_SNAPSHOTS
    }
}

/// Incremental builder of an [`Evolution`].
///
/// Snapshots can be profiled independently (even in parallel) by the caller and
/// appended here in sequence order; only the appends are order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct EvolutionAggregator {
    params: AggregationParams,
    evolution: Evolution,
}

impl EvolutionAggregator {
    pub fn new(params: AggregationParams) -> Self {
        EvolutionAggregator {
            params,
            evolution: Evolution::default(),
        }
    }

    /// Validate a profiled snapshot against the series and append it.
    ///
    /// Arguments
    /// -----------------
    /// * `snapshot`: The parsed snapshot (time, declared count, id).
    /// * `metrics`: Its structural metrics.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` once appended, anomalies being recorded on the side.
    /// * [`ClusterScopeError::NonMonotonicTime`] / [`ClusterScopeError::ParticleCountMismatch`]
    ///   when the corresponding strict flag is set; nothing is appended in that case.
    pub fn push(
        &mut self,
        snapshot: &Snapshot,
        metrics: &StructuralMetrics,
    ) -> Result<(), ClusterScopeError> {
        let index = self.evolution.series.len();
        let mut found = Vec::new();

        if let Some(&previous) = self.evolution.series.time.last() {
            // NaN on either side is not an increase
            if snapshot.time.partial_cmp(&previous) != Some(Greater) {
                if self.params.strict_time_order {
                    return Err(ClusterScopeError::NonMonotonicTime {
                        index,
                        previous,
                        time: snapshot.time,
                    });
                }
                found.push(Anomaly::NonMonotonicTime {
                    index,
                    previous,
                    time: snapshot.time,
                });
            }
        }

        if let Some(&expected) = self.evolution.series.n_particles.first() {
            if snapshot.n_particles != expected {
                if self.params.strict_particle_count {
                    return Err(ClusterScopeError::ParticleCountMismatch {
                        index,
                        expected,
                        found: snapshot.n_particles,
                    });
                }
                found.push(Anomaly::ParticleCountMismatch {
                    index,
                    expected,
                    found: snapshot.n_particles,
                });
            }
        }

        if self.params.flag_truncated && !snapshot.is_complete() {
            found.push(Anomaly::TruncatedSnapshot {
                index,
                declared: snapshot.n_particles,
                parsed: snapshot.parsed_particles(),
            });
        }

        for anomaly in &found {
            warn!(?anomaly, "snapshot anomaly");
        }

        debug!(
            index,
            time = snapshot.time,
            r_core = metrics.r_core,
            r_half = metrics.r_half,
            v_std = metrics.v_std,
            "snapshot profiled"
        );

        self.evolution.series.push(snapshot, metrics);
        self.evolution.anomalies.extend(found);
        Ok(())
    }

    /// Parse, profile and append one snapshot source.
    pub fn push_source(&mut self, source: &str) -> Result<(), ClusterScopeError> {
        let snapshot = parse_snapshot(source)?;
        let metrics = profile(&snapshot)?;
        self.push(&snapshot, &metrics)
    }

    /// Series built so far.
    pub fn series(&self) -> &EvolutionSeries {
        &self.evolution.series
    }

    /// Complete the aggregation.
    pub fn finish(self) -> Evolution {
        let evolution = self.evolution;
        if !evolution.is_sufficient() {
            warn!(
                snapshots = evolution.series.len(),
                required = MIN_SNAPSHOTS,
                "insufficient snapshots to describe an evolution"
            );
        }
        info!(
            snapshots = evolution.series.len(),
            anomalies = evolution.anomalies.len(),
            "aggregation complete"
        );
        evolution
    }
}

/// Build an [`Evolution`] from ordered snapshot sources with default parameters.
///
/// Fewer than two sources is not an error: the returned evolution reports
/// `is_sufficient() == false`.
///
/// See also
/// ------------
/// * [`aggregate_with`] – Same with explicit [`AggregationParams`].
pub fn aggregate<I>(sources: I) -> Result<Evolution, ClusterScopeError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    aggregate_with(sources, &AggregationParams::default())
}

/// Build an [`Evolution`] from ordered snapshot sources.
///
/// Arguments
/// -----------------
/// * `sources`: Snapshot texts, in the order they must appear in the series.
/// * `params`: Strictness switches.
///
/// Return
/// ----------
/// * The evolution with its anomalies.
/// * The first parse/profile error, unchanged; or a strict-mode validation error.
pub fn aggregate_with<I>(sources: I, params: &AggregationParams) -> Result<Evolution, ClusterScopeError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut aggregator = EvolutionAggregator::new(params.clone());
    for source in sources {
        aggregator.push_source(source.as_ref())?;
    }
    Ok(aggregator.finish())
}

/// Build an [`Evolution`] from snapshot files read in the given order.
///
/// Files are read synchronously, one at a time; the text is then handled exactly as
/// by [`aggregate_with`]. With the `progress` feature a progress bar is drawn on stderr.
///
/// See also
/// ------------
/// * [`discover_snapshots`](crate::snapshot::snapshot_files::discover_snapshots) – Lists `NNNN.dat` files in order.
pub fn aggregate_files<P>(paths: &[P], params: &AggregationParams) -> Result<Evolution, ClusterScopeError>
where
    P: AsRef<Utf8Path>,
{
    #[cfg(feature = "progress")]
    let pb = {
        let pb = ProgressBar::new(paths.len() as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | {msg}")
        {
            pb.set_style(style);
        }
        pb
    };

    let mut aggregator = EvolutionAggregator::new(params.clone());
    for path in paths {
        let path = path.as_ref();
        debug!(path = %path, "reading snapshot file");
        let content = std::fs::read_to_string(path)?;
        aggregator.push_source(&content)?;

        #[cfg(feature = "progress")]
        {
            pb.set_message(path.to_string());
            pb.inc(1);
        }
    }

    #[cfg(feature = "progress")]
    pb.finish_and_clear();

    Ok(aggregator.finish())
}
