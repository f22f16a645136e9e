use thiserror::Error;

use crate::constants::Time;

#[derive(Error, Debug)]
pub enum ClusterScopeError {
    #[error("Snapshot ends before the {0} header line")]
    MissingHeader(&'static str),

    #[error("Invalid snapshot header {field}: {value:?}")]
    InvalidHeader { field: &'static str, value: String },

    #[error("Malformed particle record at line {line}: field {field} = {value:?}")]
    MalformedRecord {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Cannot profile a snapshot without particles")]
    EmptySnapshot,

    #[error("Snapshot {index} goes back in time: t = {time} after t = {previous}")]
    NonMonotonicTime {
        index: usize,
        previous: Time,
        time: Time,
    },

    #[error("Snapshot {index} declares {found} particles, expected {expected}")]
    ParticleCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid regime threshold: {0}")]
    InvalidRegimeThreshold(String),

    #[error("Invalid aggregation parameter: {0}")]
    InvalidAggregationParameter(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Invalid snapshot file pattern: {0}")]
    InvalidFilePattern(#[from] regex::Error),
}

impl PartialEq for ClusterScopeError {
    fn eq(&self, other: &Self) -> bool {
        use ClusterScopeError::*;
        match (self, other) {
            (MissingHeader(a), MissingHeader(b)) => a == b,
            (
                InvalidHeader {
                    field: fa,
                    value: va,
                },
                InvalidHeader {
                    field: fb,
                    value: vb,
                },
            ) => fa == fb && va == vb,
            (
                MalformedRecord {
                    line: la,
                    field: fa,
                    value: va,
                },
                MalformedRecord {
                    line: lb,
                    field: fb,
                    value: vb,
                },
            ) => la == lb && fa == fb && va == vb,
            (EmptySnapshot, EmptySnapshot) => true,
            (
                NonMonotonicTime {
                    index: ia,
                    previous: pa,
                    time: ta,
                },
                NonMonotonicTime {
                    index: ib,
                    previous: pb,
                    time: tb,
                },
            ) => ia == ib && pa == pb && ta == tb,
            (
                ParticleCountMismatch {
                    index: ia,
                    expected: ea,
                    found: fa,
                },
                ParticleCountMismatch {
                    index: ib,
                    expected: eb,
                    found: fb,
                },
            ) => ia == ib && ea == eb && fa == fb,
            (InvalidRegimeThreshold(a), InvalidRegimeThreshold(b)) => a == b,
            (InvalidAggregationParameter(a), InvalidAggregationParameter(b)) => a == b,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,

            // Wrapped library errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (InvalidFilePattern(_), InvalidFilePattern(_)) => true,

            _ => false,
        }
    }
}
