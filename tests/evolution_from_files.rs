mod common;

use clusterscope::evolution::summary::EvolutionSummary;
use clusterscope::evolution::{aggregate_files, AggregationParams};
use clusterscope::snapshot::snapshot_files::discover_snapshots;
use clusterscope::{aggregate, classify, Anomaly, Regime};
use common::{data_path, synthetic_source};

#[test]
fn test_evolution_from_directory() {
    let paths = discover_snapshots(&data_path("cluster")).unwrap();
    let evolution = aggregate_files(&paths, &AggregationParams::default()).unwrap();

    assert!(evolution.is_sufficient());
    assert!(evolution.anomalies.is_empty());

    let series = &evolution.series;
    assert_eq!(series.time, vec![0.0, 0.5, 1.0]);
    assert_eq!(series.snapshot_id, vec![0, 1, 2]);
    assert_eq!(series.r_core, vec![2.0, 2.0, 2.0]);
    assert_eq!(series.r_half, vec![6.0, 6.0, 6.0]);
    assert_eq!(series.r_tidal, vec![10.0, 11.0, 12.0]);
    assert_eq!(series.n_particles, vec![10, 10, 10]);
    assert_eq!(series.concentration(), vec![Some(3.0); 3]);

    assert_eq!(classify(series), Regime::Evaporation);

    let summary = EvolutionSummary::from_series(series).unwrap();
    assert_eq!(summary.t_end, 1.0);
    assert_eq!(summary.r_core.relative_change(), Some(0.0));
}

#[test]
fn test_truncated_file_in_sequence_is_flagged() {
    let paths = [data_path("cluster/0000.dat"), data_path("truncated.dat")];
    let evolution = aggregate_files(&paths, &AggregationParams::default()).unwrap();

    assert_eq!(evolution.series.len(), 2);
    assert_eq!(
        evolution.anomalies,
        vec![Anomaly::TruncatedSnapshot {
            index: 1,
            declared: 10,
            parsed: 9,
        }]
    );
}

#[test]
fn test_core_collapse_scenario() {
    let radii_0: Vec<f64> = (1..=10).map(f64::from).collect();
    // core shrinks, half-mass radius and envelope stay put
    let radii_1 = [0.2, 0.5, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let sources = [
        synthetic_source(0, 0.0, &radii_0),
        synthetic_source(1, 2.0, &radii_1),
    ];
    let evolution = aggregate(&sources).unwrap();

    assert_eq!(evolution.series.r_core, vec![2.0, 0.5]);
    assert_eq!(evolution.series.r_half, vec![6.0, 6.0]);
    assert_eq!(classify(&evolution.series), Regime::CoreCollapse);
}

#[test]
fn test_single_snapshot_directory_probe() {
    let evolution = aggregate_files(&[data_path("cluster/0000.dat")], &AggregationParams::default())
        .unwrap();
    assert!(!evolution.is_sufficient());
    assert_eq!(classify(&evolution.series), Regime::InsufficientData);
}
