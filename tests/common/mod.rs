#![allow(dead_code)]

use camino::Utf8PathBuf;

pub fn data_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from("tests/data").join(name)
}

/// Snapshot text with one particle per radius, placed on the x axis.
pub fn synthetic_source(id: i64, time: f64, radii: &[f64]) -> String {
    let mut text = format!("{id}\n{}\n{time}\n", radii.len());
    for (i, r) in radii.iter().enumerate() {
        text.push_str(&format!("{i} 1.0 {r} 0.0 0.0 0.1 0.2 0.2\n"));
    }
    text
}
