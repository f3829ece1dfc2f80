//! Error types for decoding RAW files and querying datasets

use thiserror::Error;

/// Defects in a schema table. These point at the layout definitions, not at the input bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field `{field}` declared twice in schema `{schema}`")]
    DuplicateField { schema: String, field: String },

    #[error("unknown field type code `{0}`")]
    UnknownFieldType(String),

    #[error("schema `{schema}` has no field `{field}`")]
    MissingField { schema: String, field: String },

    #[error("field `{field}` does not hold a {expected} value")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("trailing field `{field}` must be the last field of schema `{schema}`")]
    TrailingFieldNotLast { schema: String, field: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid format: expected RAW1.01 signature, found {found:?}")]
    InvalidFormat { found: String },

    #[error(
        "truncated record `{record}`: field `{field}` at offset {offset} needs {needed} bytes, {available} available"
    )]
    TruncatedRecord {
        record: String,
        field: String,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("unknown supplemental header type {tag} at offset {offset}")]
    UnknownSupplementalHeaderType { tag: u32, offset: usize },

    #[error("range {index} is inconsistent with the first range: {reason}")]
    InconsistentRanges { index: usize, reason: String },

    #[error("file contains no ranges with data")]
    EmptyDataset,

    #[error("tilt axes differ, datasets cannot be combined")]
    AxisMismatch,

    #[error("invalid region: {0} (expected \"all\" or x1,y1,x2,y2)")]
    InvalidRegion(String),

    #[error("invalid axis `{0}` (expected \"angular\" or \"tilt\")")]
    InvalidAxis(String),

    #[error("cannot look up a value on an empty axis")]
    EmptyAxis,

    #[error("lookup value {0} is not finite")]
    NonFiniteQuery(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
