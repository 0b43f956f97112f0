//! Error types for the endpoint validator
//!
//! Every failure a run can hit is one variant here. Messages are meant to be
//! read by the operator, so each one names the input that caused it.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Why a JSON-bearing input was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonFailure {
    /// The text is not JSON at all
    Syntax(String),
    /// Valid JSON, but not the expected structure
    Shape(String),
}

impl fmt::Display for JsonFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonFailure::Syntax(msg) => write!(f, "not valid JSON ({msg})"),
            JsonFailure::Shape(msg) => write!(f, "unexpected structure ({msg})"),
        }
    }
}

/// Main error type for the endpoint validator
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    #[error("{0} path is required. Pass it as a flag or run interactively to be prompted")]
    InputMissing(&'static str),

    #[error("{label} could not be read from '{path}': {error}")]
    FileUnreadable {
        label: String,
        path: String,
        error: String,
    },

    #[error("{label} at '{path}' is empty")]
    FileEmpty { label: String, path: String },

    #[error("invalid {field}: {kind}")]
    MalformedJson {
        field: &'static str,
        kind: JsonFailure,
    },

    // === Contract Errors ===
    #[error("OAS 3.0 document is invalid: {0}")]
    ContractInvalid(String),

    // === Stored Configuration Errors ===
    #[error("Config file update/create failed at '{path}': {error}")]
    ConfigWriteFailed { path: String, error: String },

    #[error("Failed to upload config file from '{path}': {error}")]
    ConfigReadFailed { path: String, error: String },

    // === Execution Errors ===
    #[error("Failed loading test parameters: {0}")]
    ParameterLoadFailed(String),

    #[error("Test run failed: {passed} passed, {failed} failed")]
    TestsFailed { passed: usize, failed: usize },

    // === Settings Errors ===
    #[error("Invalid settings file: {0}")]
    Settings(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file unreadable error for a labelled input
    pub fn file_unreadable(label: &str, path: &str, error: impl fmt::Display) -> Self {
        Self::FileUnreadable {
            label: label.to_string(),
            path: path.to_string(),
            error: error.to_string(),
        }
    }

    /// Create a file empty error for a labelled input
    pub fn file_empty(label: &str, path: &str) -> Self {
        Self::FileEmpty {
            label: label.to_string(),
            path: path.to_string(),
        }
    }

    /// Create a malformed JSON error for a named option
    pub fn malformed_json(field: &'static str, kind: JsonFailure) -> Self {
        Self::MalformedJson { field, kind }
    }

    /// Whether this failure stops the current run.
    ///
    /// Only stored-configuration reads and writes are recoverable; the
    /// resolver logs them and keeps going with what it has.
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Error::ConfigWriteFailed { .. } | Error::ConfigReadFailed { .. }
        )
    }
}
