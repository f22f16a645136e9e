mod common;

use approx::assert_relative_eq;
use clusterscope::snapshot::snapshot_files::{discover_snapshots, read_snapshot_file};
use clusterscope::{profile, ClusterScopeError};
use common::data_path;

#[test]
fn test_discover_snapshots_in_order() {
    let paths = discover_snapshots(&data_path("cluster")).unwrap();
    let names: Vec<&str> = paths.iter().filter_map(|p| p.file_name()).collect();
    assert_eq!(names, vec!["0000.dat", "0001.dat", "0002.dat"]);
}

#[test]
fn test_read_snapshot_file() {
    let snapshot = read_snapshot_file(&data_path("cluster/0001.dat")).unwrap();
    assert_eq!(snapshot.snapshot_id, 1);
    assert_eq!(snapshot.n_particles, 10);
    assert_eq!(snapshot.time, 0.5);
    assert!(snapshot.is_complete());
    assert_relative_eq!(snapshot.total_mass(), 0.01, max_relative = 1e-12);

    let metrics = profile(&snapshot).unwrap();
    assert_eq!(metrics.r_core, 2.0);
    assert_eq!(metrics.r_half, 6.0);
    assert_eq!(metrics.r_tidal, 11.0);
    assert_eq!(metrics.r_max, 11.0);
    assert_relative_eq!(metrics.v_mean, 0.95, max_relative = 1e-12);
}

#[test]
fn test_truncated_file_keeps_complete_records() {
    let snapshot = read_snapshot_file(&data_path("truncated.dat")).unwrap();
    assert_eq!(snapshot.n_particles, 10);
    assert_eq!(snapshot.particles.len(), 9);
    assert_eq!(snapshot.missing_particles(), 1);
}

#[test]
fn test_malformed_file_fails() {
    let result = read_snapshot_file(&data_path("malformed.dat"));
    assert_eq!(
        result,
        Err(ClusterScopeError::MalformedRecord {
            line: 5,
            field: "mass",
            value: "heavy".into(),
        })
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let result = read_snapshot_file(&data_path("cluster/9999.dat"));
    assert!(matches!(result, Err(ClusterScopeError::IoError(_))));
}
