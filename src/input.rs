//! Input file reader: YAML, CSV, and plain text, dispatched by extension.
//!
//! The caller may pin an expected format; a mismatching extension is rejected
//! before the file is ever opened. No schema validation happens here beyond
//! format detection - malformed content surfaces as the underlying parse error.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use clap::ValueEnum;

use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    Yaml,
    Csv,
    Text,
}

impl FileFormat {
    /// Detect the format from the file extension alone.
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            "csv" => Ok(FileFormat::Csv),
            "txt" | "text" => Ok(FileFormat::Text),
            other => Err(InputError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormat::Yaml => "yaml",
            FileFormat::Csv => "csv",
            FileFormat::Text => "text",
        };
        f.write_str(name)
    }
}

/// Parsed file content in the shape its format implies.
#[derive(Debug)]
pub enum InputData {
    /// Structured key/value tree (YAML).
    Structured(serde_yaml::Value),
    /// Header-keyed row maps (CSV).
    Rows(Vec<HashMap<String, String>>),
    /// Raw text.
    Text(String),
}

/// Detect the file's format, enforcing the expected tag when one is given.
pub fn detect_format(path: &Path, expected: Option<FileFormat>) -> Result<FileFormat, InputError> {
    let detected = FileFormat::from_path(path)?;
    if let Some(expected) = expected {
        if expected != detected {
            return Err(InputError::FormatMismatch { expected, detected });
        }
    }
    Ok(detected)
}

/// Read and parse an input file according to its detected format.
pub fn read_input(path: &Path, expected: Option<FileFormat>) -> Result<InputData, InputError> {
    let format = detect_format(path, expected)?;

    if !path.exists() {
        return Err(InputError::FileNotFound(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        FileFormat::Yaml => Ok(InputData::Structured(serde_yaml::from_str(&raw)?)),
        FileFormat::Csv => Ok(InputData::Rows(read_csv_rows(&raw)?)),
        FileFormat::Text => Ok(InputData::Text(raw)),
    }
}

fn read_csv_rows(raw: &str) -> Result<Vec<HashMap<String, String>>, InputError> {
    let mut reader = csv::Reader::from_reader(raw.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
