//! # Snapshot text reader
//!
//! Parses one serialized snapshot into a [`Snapshot`].
//!
//! ## Format
//! -----------------
//! ```text
//! <snapshot_id>                          (line 1, integer)
//! <n_particles>                          (line 2, integer)
//! <time>                                 (line 3, real)
//! <id> <mass> <x> <y> <z> <vx> <vy> <vz> (one per particle)
//! ```
//!
//! ## Tolerance policy
//! -----------------
//! Every data line goes through [`read_record`], which yields either a well-typed
//! particle or [`RecordLine::Skip`]:
//! - a line with fewer than 8 whitespace-separated tokens is **skipped** (truncated
//!   in-progress files must not abort the analysis),
//! - a line with 8 or more tokens whose fields fail numeric parsing makes the whole
//!   snapshot fail with [`ClusterScopeError::MalformedRecord`].
//!
//! Tokens past the eighth are ignored.
use nalgebra::Vector3;
use tracing::trace;

use crate::{
    clusterscope_errors::ClusterScopeError,
    constants::{ParticleId, SnapshotId, Time, HEADER_LINES, PARTICLE_RECORD_TOKENS},
    snapshot::{Particle, Snapshot},
};

/// Outcome of the per-line validation step.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLine {
    Particle(Particle),
    Skip,
}

/// Field names of a particle record, in column order.
const RECORD_FIELDS: [&str; PARTICLE_RECORD_TOKENS] =
    ["id", "mass", "x", "y", "z", "vx", "vy", "vz"];

fn parse_field<T: std::str::FromStr>(
    token: &str,
    line: usize,
    column: usize,
) -> Result<T, ClusterScopeError> {
    token
        .parse::<T>()
        .map_err(|_| ClusterScopeError::MalformedRecord {
            line,
            field: RECORD_FIELDS[column],
            value: token.to_string(),
        })
}

/// Validate a single particle record line.
///
/// Arguments
/// -----------------
/// * `line`: The raw text of the record.
/// * `line_number`: 1-based line number in the source, used for diagnostics.
///
/// Return
/// ----------
/// * `Ok(RecordLine::Particle)` for a well-formed record.
/// * `Ok(RecordLine::Skip)` when the line has fewer than 8 tokens.
/// * `Err(ClusterScopeError::MalformedRecord)` when a field of a full-length line
///   does not parse as its expected type.
pub fn read_record(line: &str, line_number: usize) -> Result<RecordLine, ClusterScopeError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < PARTICLE_RECORD_TOKENS {
        trace!(
            line = line_number,
            tokens = tokens.len(),
            "skipping short particle record"
        );
        return Ok(RecordLine::Skip);
    }

    let id = parse_field::<ParticleId>(tokens[0], line_number, 0)?;
    let mut values = [0.0_f64; PARTICLE_RECORD_TOKENS - 1];
    for (column, value) in values.iter_mut().enumerate() {
        *value = parse_field::<f64>(tokens[column + 1], line_number, column + 1)?;
    }
    let [mass, x, y, z, vx, vy, vz] = values;

    Ok(RecordLine::Particle(Particle::new(
        id,
        mass,
        Vector3::new(x, y, z),
        Vector3::new(vx, vy, vz),
    )))
}

fn header_line<I>(lines: &mut I, name: &'static str) -> Result<String, ClusterScopeError>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    lines
        .next()
        .map(|l| l.as_ref().trim().to_string())
        .ok_or(ClusterScopeError::MissingHeader(name))
}

fn parse_header<T: std::str::FromStr>(
    value: String,
    field: &'static str,
) -> Result<T, ClusterScopeError> {
    value
        .parse::<T>()
        .map_err(|_| ClusterScopeError::InvalidHeader { field, value })
}

/// Parse a snapshot from a sequence of text lines.
///
/// Arguments
/// -----------------
/// * `lines`: The lines of one snapshot source, header first.
///
/// Return
/// ----------
/// * The parsed [`Snapshot`]. Its particle count may be lower than the declared
///   `n_particles` if short lines were skipped.
/// * [`ClusterScopeError::MissingHeader`] / [`ClusterScopeError::InvalidHeader`] when the
///   three header lines are absent or not numeric.
/// * [`ClusterScopeError::MalformedRecord`] on the first full-length record with a bad field.
///
/// See also
/// ------------
/// * [`parse_snapshot`] – Same, over a single string.
/// * [`read_record`] – Per-line validation.
pub fn parse_lines<I>(lines: I) -> Result<Snapshot, ClusterScopeError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut lines = lines.into_iter();

    let snapshot_id: SnapshotId =
        parse_header(header_line(&mut lines, "snapshot id")?, "snapshot id")?;
    let n_particles: usize =
        parse_header(header_line(&mut lines, "particle count")?, "particle count")?;
    let time: Time = parse_header(header_line(&mut lines, "time")?, "time")?;

    let mut particles = Vec::new();
    for (offset, line) in lines.enumerate() {
        match read_record(line.as_ref(), HEADER_LINES + offset + 1)? {
            RecordLine::Particle(p) => particles.push(p),
            RecordLine::Skip => {}
        }
    }

    Ok(Snapshot {
        snapshot_id,
        n_particles,
        time,
        particles,
    })
}

/// Parse a snapshot from its full text.
///
/// This is the entry point used by the aggregator; see [`parse_lines`] for the
/// error contract.
pub fn parse_snapshot(source: &str) -> Result<Snapshot, ClusterScopeError> {
    parse_lines(source.lines())
}

#[cfg(test)]
mod snapshot_reader_test {
    use super::*;

    const SOURCE: &str = "12
3
0.5
0 1.0 1.0 0.0 0.0 0.0 0.1 0.0
1 2.0 0.0 2.0 0.0 0.0 0.0 0.2
5 0.5 0.0 0.0 -3.0 0.3 0.0 0.0
";

    #[test]
    fn test_parse_header_and_records() {
        let snapshot = parse_snapshot(SOURCE).unwrap();
        assert_eq!(snapshot.snapshot_id, 12);
        assert_eq!(snapshot.n_particles, 3);
        assert_eq!(snapshot.time, 0.5);
        assert_eq!(snapshot.particles.len(), 3);
        assert_eq!(snapshot.particles[2].id, 5);
        assert_eq!(snapshot.particles[2].mass, 0.5);
        assert_eq!(snapshot.particles[2].position, Vector3::new(0.0, 0.0, -3.0));
        assert_eq!(snapshot.particles[1].velocity, Vector3::new(0.0, 0.0, 0.2));
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(
            parse_snapshot(SOURCE).unwrap(),
            parse_snapshot(SOURCE).unwrap()
        );
    }

    #[test]
    fn test_seven_token_line_is_skipped() {
        let source = "1\n2\n0.0\n0 1.0 1.0 0.0 0.0 0.0 0.0 0.0\n1 1.0 1.0 0.0 0.0 0.0 0.0\n";
        let snapshot = parse_snapshot(source).unwrap();
        assert_eq!(snapshot.particles.len(), 1);
        assert_eq!(snapshot.n_particles, 2);
        assert!(!snapshot.is_complete());
    }

    #[test]
    fn test_oversized_declared_count() {
        let source = "1\n1000000000\n0.0\n0 1.0 1.0 0.0 0.0 0.0 0.0 0.0\n";
        let snapshot = parse_snapshot(source).unwrap();
        assert_eq!(snapshot.n_particles, 1_000_000_000);
        assert_eq!(snapshot.particles.len(), 1);
        assert!(snapshot.particles.capacity() < 1024);
        assert_eq!(snapshot.missing_particles(), 999_999_999);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let source = "1\n1\n0.0\n\n0 1.0 1.0 0.0 0.0 0.0 0.0 0.0\n   \n";
        let snapshot = parse_snapshot(source).unwrap();
        assert_eq!(snapshot.particles.len(), 1);
    }

    #[test]
    fn test_non_numeric_field_fails_whole_snapshot() {
        let source = "1\n2\n0.0\n0 1.0 1.0 0.0 0.0 0.0 0.0 0.0\n1 1.0 abc 0.0 0.0 0.0 0.0 0.0\n";
        assert_eq!(
            parse_snapshot(source),
            Err(ClusterScopeError::MalformedRecord {
                line: 5,
                field: "x",
                value: "abc".into(),
            })
        );
    }

    #[test]
    fn test_fractional_id_is_malformed() {
        let result = read_record("1.5 1.0 1.0 0.0 0.0 0.0 0.0 0.0", 4);
        assert!(matches!(
            result,
            Err(ClusterScopeError::MalformedRecord { field: "id", .. })
        ));
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let record = read_record("3 1.0 1.0 2.0 3.0 4.0 5.0 6.0 extra 99", 4).unwrap();
        match record {
            RecordLine::Particle(p) => {
                assert_eq!(p.id, 3);
                assert_eq!(p.velocity, Vector3::new(4.0, 5.0, 6.0));
            }
            RecordLine::Skip => panic!("expected a particle"),
        }
    }

    #[test]
    fn test_missing_and_invalid_header() {
        assert_eq!(
            parse_snapshot("7\n10\n"),
            Err(ClusterScopeError::MissingHeader("time"))
        );
        assert_eq!(
            parse_snapshot(""),
            Err(ClusterScopeError::MissingHeader("snapshot id"))
        );
        assert_eq!(
            parse_snapshot("7\nten\n0.0\n"),
            Err(ClusterScopeError::InvalidHeader {
                field: "particle count",
                value: "ten".into(),
            })
        );
    }

    #[test]
    fn test_parse_lines_from_vec() {
        let lines = vec!["3", "0", "1.5"];
        let snapshot = parse_lines(lines).unwrap();
        assert_eq!(snapshot.snapshot_id, 3);
        assert!(snapshot.particles.is_empty());
        assert!(snapshot.is_complete());
    }
}
