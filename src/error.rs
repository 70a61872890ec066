//! Error taxonomy for input loading and configuration.
//!
//! Per-request API failures are deliberately not here: those are recorded as
//! values (`models::ApiFailure`) so a run can continue with partial data.

use std::path::PathBuf;

use thiserror::Error;

use crate::input::FileFormat;

/// Errors from reading an ICP input file. All of these are fatal for the run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("file type mismatch: expected '{expected}' but got '{detected}'")]
    FormatMismatch {
        expected: FileFormat,
        detected: FileFormat,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors from assembling the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APOLLO_API_KEY is not set; add it to the environment or a .env file")]
    MissingCredential,
}
