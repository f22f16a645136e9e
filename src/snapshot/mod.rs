//! # Snapshots: normalized particle records
//!
//! A [`Snapshot`] is one time-stamped capture of every particle state written by the
//! external N-body integrator. It is built once by the parser and never mutated.
//!
//! Modules
//! -----------------
//! * [`snapshot_reader`](crate::snapshot::snapshot_reader) – Text parser (header + tolerant particle records).
//! * [`snapshot_files`](crate::snapshot::snapshot_files) – Directory discovery and file loading helpers.
//!
//! Frame
//! -----------------
//! Positions and velocities are expressed in a frame centered on the origin. The analysis
//! assumes the origin already approximates the system's center and never recenters.
use nalgebra::Vector3;

use crate::constants::{ParticleId, Radius, SnapshotId, Speed, Time};

pub mod snapshot_files;
pub mod snapshot_reader;

/// One body at a snapshot instant.
///
/// Fields
/// -----------------
/// * `id` – Identifier, unique within a snapshot (not required to be contiguous).
/// * `mass` – Particle mass.
/// * `position` – Position relative to the origin.
/// * `velocity` – Velocity in the same frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub mass: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl Particle {
    pub fn new(id: ParticleId, mass: f64, position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Particle {
            id,
            mass,
            position,
            velocity,
        }
    }

    /// Distance from the origin.
    #[inline]
    pub fn radius(&self) -> Radius {
        self.position.norm()
    }

    /// Velocity magnitude.
    #[inline]
    pub fn speed(&self) -> Speed {
        self.velocity.norm()
    }
}

/// A parsed snapshot: header metadata and the particle table.
///
/// `particles.len()` may be smaller than `n_particles` when short records were skipped
/// by the reader. Use [`Snapshot::is_complete`] when exact counts matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub snapshot_id: SnapshotId,
    pub n_particles: usize,
    pub time: Time,
    pub particles: Vec<Particle>,
}

impl Snapshot {
    /// Number of particle records actually parsed.
    pub fn parsed_particles(&self) -> usize {
        self.particles.len()
    }

    /// True when every declared particle was parsed.
    pub fn is_complete(&self) -> bool {
        self.particles.len() >= self.n_particles
    }

    /// Declared particles that were not parsed (skipped or absent lines).
    pub fn missing_particles(&self) -> usize {
        self.n_particles.saturating_sub(self.particles.len())
    }

    /// Total mass of the parsed particles.
    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass).sum()
    }
}
