//! Error types for the Sieve library.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a parse call produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input contained no non-empty lines.
    EmptyInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::EmptyInput => write!(f, "input contains no non-empty lines"),
        }
    }
}

/// Main error type for Sieve operations.
#[derive(Debug, Error)]
pub enum SieveError {
    /// Error parsing delimited text.
    #[error("Parse error: {kind}")]
    Parse { kind: ParseErrorKind },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two schema entries share an original column name.
    #[error("Duplicate column '{0}' in schema")]
    DuplicateColumn(String),

    /// A cleaning operation id outside the known catalog.
    #[error("Unknown cleaning operation: {0}")]
    UnknownOperation(String),

    /// Snapshot store read/write failure.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Remote table store rejected or failed a bulk insert.
    #[error("Remote store error: {0}")]
    Remote(String),

    /// A persistence call did not finish within its deadline.
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SieveError {
    /// Shorthand for the empty-input parse failure.
    pub fn empty_input() -> Self {
        SieveError::Parse {
            kind: ParseErrorKind::EmptyInput,
        }
    }
}

/// Result type alias for Sieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;
