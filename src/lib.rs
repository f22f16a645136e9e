//! # Clusterscope
//!
//! Structural diagnostics for time-evolving gravitational N-body systems.
//!
//! Given the ordered snapshots written by an external integrator, Clusterscope computes
//! radial, kinematic and density statistics per snapshot, assembles them into time
//! series, and classifies the current dynamical regime of the cluster.
//!
//! ## Pipeline
//!
//! 1. [`parse_snapshot`] – snapshot text → [`Snapshot`]
//! 2. [`profile`] – [`Snapshot`] → [`StructuralMetrics`]
//! 3. [`aggregate`] – ordered sources → [`Evolution`] (series + anomalies)
//! 4. [`classify`] – [`EvolutionSeries`] → [`Regime`]
//!
//! Every stage is a pure function of its input and can be tested on its own. Nothing is
//! written to disk and no plotting happens here: callers format and persist results.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use clusterscope::evolution::{aggregate_files, AggregationParams};
//! use clusterscope::snapshot::snapshot_files::discover_snapshots;
//! use clusterscope::evolution::summary::EvolutionSummary;
//! use clusterscope::classify;
//!
//! # fn run() -> Result<(), clusterscope::ClusterScopeError> {
//! let paths = discover_snapshots(Utf8Path::new("run_m15"))?;
//! let evolution = aggregate_files(&paths, &AggregationParams::default())?;
//!
//! for anomaly in &evolution.anomalies {
//!     eprintln!("{anomaly:?}");
//! }
//! if let Some(summary) = EvolutionSummary::from_series(&evolution.series) {
//!     println!("{summary:#}");
//! }
//! println!("{:#}", classify(&evolution.series));
//! # Ok(()) }
//! ```
pub mod clusterscope_errors;
pub mod constants;
pub mod evolution;
pub mod regime;
pub mod snapshot;
pub mod structural_profile;

pub use clusterscope_errors::ClusterScopeError;
pub use evolution::{aggregate, aggregate_with, Anomaly, Evolution, EvolutionSeries};
pub use regime::{classify, Regime, RegimeClassifier, RegimeThresholds};
pub use snapshot::snapshot_reader::parse_snapshot;
pub use snapshot::{Particle, Snapshot};
pub use structural_profile::{profile, StructuralMetrics};
