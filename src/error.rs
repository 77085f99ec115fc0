use std::path::PathBuf;
use thiserror::Error;

use crate::format::Format;

/// The main error type for labelport operations.
#[derive(Debug, Error)]
pub enum LabelportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: '{0}'")]
    InvalidFormat(String),

    #[error("No labeling config given; pass --config or --schema")]
    MissingSchema,

    #[error("Failed to parse labeling config {path}: {message}")]
    LabelConfigParse { path: PathBuf, message: String },

    #[error("Failed to parse schema JSON from {path}: {source}")]
    SchemaJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse annotation records from {path}: {source}")]
    RecordJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid record source {path}: {message}")]
    RecordSource { path: PathBuf, message: String },

    #[error("Record {index} has no '{field}' field")]
    MissingRecordField { index: usize, field: String },

    #[error("Format {format} is not provided by the configured export library")]
    LibraryUnsupported { format: Format },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
