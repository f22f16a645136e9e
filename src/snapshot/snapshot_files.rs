//! # Snapshot files on disk
//!
//! Helpers for callers that keep integrator output as one file per snapshot
//! (`0000.dat`, `0001.dat`, ...). These sit outside the pure core: reading bytes
//! is synchronous and happens here, the parser only ever sees text.
//!
//! See also
//! ------------
//! * [`parse_snapshot`](crate::snapshot::snapshot_reader::parse_snapshot) – Text parser.
//! * [`aggregate_files`](crate::evolution::aggregate_files) – Builds an evolution from file paths.
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use regex::Regex;
use tracing::info;

use crate::{
    clusterscope_errors::ClusterScopeError, constants::SNAPSHOT_FILE_PATTERN,
    snapshot::snapshot_reader::parse_snapshot, snapshot::Snapshot,
};

/// List the snapshot files of a directory, sorted by file name.
///
/// A file is a snapshot when its name is four digits followed by `.dat`. Because the
/// names are zero-padded, lexicographic order is the integrator's output order.
///
/// Arguments
/// -----------------
/// * `dir`: Directory to scan (not recursive).
///
/// Return
/// ----------
/// * The sorted list of matching paths, possibly empty.
/// * [`ClusterScopeError::IoError`] if the directory cannot be read.
/// * [`ClusterScopeError::Utf8PathError`] if an entry name is not valid UTF-8.
pub fn discover_snapshots(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ClusterScopeError> {
    let pattern = Regex::new(SNAPSHOT_FILE_PATTERN)?;

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = Utf8PathBuf::from_path_buf(entry?.path())
            .map_err(|p| ClusterScopeError::Utf8PathError(p.display().to_string()))?;
        if path.is_file() && path.file_name().is_some_and(|name| pattern.is_match(name)) {
            paths.push(path);
        }
    }

    let paths = paths
        .into_iter()
        .sorted_by(|a, b| a.file_name().cmp(&b.file_name()))
        .collect_vec();

    info!(dir = %dir, count = paths.len(), "discovered snapshot files");
    Ok(paths)
}

/// Read and parse one snapshot file.
pub fn read_snapshot_file(path: &Utf8Path) -> Result<Snapshot, ClusterScopeError> {
    let content = std::fs::read_to_string(path)?;
    parse_snapshot(&content)
}

#[cfg(test)]
mod snapshot_files_test {
    use super::*;

    #[test]
    fn test_pattern_matches_integrator_names() {
        let pattern = Regex::new(SNAPSHOT_FILE_PATTERN).unwrap();
        assert!(pattern.is_match("0000.dat"));
        assert!(pattern.is_match("0420.dat"));
        assert!(!pattern.is_match("000.dat"));
        assert!(!pattern.is_match("00001.dat"));
        assert!(!pattern.is_match("0001.dat.bak"));
        assert!(!pattern.is_match("abcd.dat"));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let result = discover_snapshots(Utf8Path::new("does/not/exist"));
        assert!(matches!(result, Err(ClusterScopeError::IoError(_))));
    }
}
