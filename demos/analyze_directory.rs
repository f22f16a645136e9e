//! Analyze every `NNNN.dat` snapshot of a directory and print the evolution summary.
//!
//! ```text
//! RUST_LOG=clusterscope=debug cargo run --example analyze_directory -- path/to/run
//! ```
use camino::Utf8PathBuf;
use clusterscope::evolution::summary::EvolutionSummary;
use clusterscope::evolution::{aggregate_files, AggregationParams};
use clusterscope::snapshot::snapshot_files::discover_snapshots;
use clusterscope::{ClusterScopeError, RegimeClassifier};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ClusterScopeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let dir = std::env::args()
        .nth(1)
        .map(Utf8PathBuf::from)
        .unwrap_or_else(|| Utf8PathBuf::from("."));

    let paths = discover_snapshots(&dir)?;
    let evolution = aggregate_files(&paths, &AggregationParams::default())?;

    for anomaly in &evolution.anomalies {
        eprintln!("anomaly: {anomaly:?}");
    }

    let series = &evolution.series;
    for i in 0..series.len() {
        println!(
            "t={:.2}: r_core={:.3}, r_half={:.3}, sigma_v={:.3}",
            series.time[i], series.r_core[i], series.r_half[i], series.v_std[i]
        );
    }

    if let Some(summary) = EvolutionSummary::from_series(series) {
        println!("\n{summary:#}");
    }

    let classifier = RegimeClassifier::default();
    println!("\n{:#}", classifier.classify(series));
    Ok(())
}
