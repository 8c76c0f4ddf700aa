//! Error types for loading, configuration and report output.
//!
//! The audit engine itself is total over decoded input and has no error type;
//! everything here belongs to the edges around it.

use std::path::PathBuf;
use thiserror::Error;

/// A patch declaration that cannot be represented by [`crate::model::Patch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// A patch of `kind` was declared without one of its required fields.
    #[error("{kind} patch is missing required field '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
}

/// A composition document that fails the decoding preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error("composition is missing metadata.name")]
    MissingName,

    #[error("composition '{name}' is missing spec.mode")]
    MissingMode { name: String },
}

/// Errors that can occur while reading composition documents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `document` is the 0-based position in the YAML stream.
    #[error("failed to decode document {document} in {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no composition files found under {}", .path.display())]
    Empty { path: PathBuf },
}

/// Configuration file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failures while writing report files.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Write {
            path: path.into(),
            source,
        }
    }
}
