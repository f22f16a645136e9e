//! # Constants and type definitions for Clusterscope
//!
//! This module centralizes the **fixed policy constants** and **common type aliases**
//! used across the diagnostics pipeline.
//!
//! ## Overview
//!
//! - Percentile positions used to select the structural radii
//! - Default regime-classification factors
//! - Snapshot file naming convention
//! - Scalar type aliases shared by the profiler and the aggregator
//!
//! The regime factors below are decision boundaries, not tuning knobs: the
//! [`RegimeThresholds`](crate::regime::RegimeThresholds) defaults reproduce them exactly.

// -------------------------------------------------------------------------------------------------
// Structural radii
// -------------------------------------------------------------------------------------------------

/// Fraction of particles enclosed by the core radius
pub const CORE_FRACTION: f64 = 0.10;

/// Fraction of particles enclosed by the half-mass radius proxy
pub const HALF_FRACTION: f64 = 0.50;

/// Fraction of particles enclosed by the tidal radius proxy
pub const TIDAL_FRACTION: f64 = 0.90;

// -------------------------------------------------------------------------------------------------
// Regime classification
// -------------------------------------------------------------------------------------------------

/// Concentration growth factor above which the cluster is in core collapse
pub const CORE_COLLAPSE_FACTOR: f64 = 1.2;

/// Core radius shrink factor below which the cluster is mass segregating
pub const MASS_SEGREGATION_FACTOR: f64 = 0.9;

/// Tidal radius growth factor above which the cluster is evaporating
pub const EVAPORATION_FACTOR: f64 = 1.1;

/// Minimum number of snapshots needed to describe an evolution
pub const MIN_SNAPSHOTS: usize = 2;

// -------------------------------------------------------------------------------------------------
// Snapshot format
// -------------------------------------------------------------------------------------------------

/// Number of whitespace-separated tokens of a particle record
/// (`id mass x y z vx vy vz`).
pub const PARTICLE_RECORD_TOKENS: usize = 8;

/// Number of header lines preceding the particle records
pub const HEADER_LINES: usize = 3;

/// File names produced by the integrator: four digits and the `.dat` extension
pub const SNAPSHOT_FILE_PATTERN: &str = r"^[0-9]{4}\.dat$";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Distance from the origin, in simulation length units
pub type Radius = f64;

/// Velocity magnitude, in simulation velocity units
pub type Speed = f64;

/// Simulation time, in N-body time units
pub type Time = f64;

/// Identifier of a particle inside a snapshot
pub type ParticleId = i64;

/// Identifier of a snapshot, as written by the integrator
pub type SnapshotId = i64;
