//! Error types for ferro-gene-matcher
//!
//! Errors are fatal to the operation that raised them. A gene symbol that
//! fails to resolve is not an error: it is reported in the `failed` view of
//! a [`MatchResult`](crate::matcher::MatchResult).

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (E1xxx)
    /// Bad or missing configuration
    Configuration = 1001,
    /// Reference dataset has no entries
    EmptyReference = 1002,
    /// Reference row could not be parsed
    MalformedReference = 1003,
    /// Two reference rows share a (symbol, chromosome) pair
    DuplicateReferenceEntry = 1004,

    // Input errors (E2xxx)
    /// Symbol and chromosome sequences differ in length
    LengthMismatch = 2001,
    /// Input row is missing a field
    MissingField = 2002,

    // Annotation file errors (E3xxx)
    /// Required column could not be located by pattern
    ColumnNotFound = 3001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// Tab-separated parsing error
    TsvError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::Configuration => "invalid configuration",
            ErrorCode::EmptyReference => "reference dataset is empty",
            ErrorCode::MalformedReference => "malformed reference row",
            ErrorCode::DuplicateReferenceEntry => "duplicate reference symbol and chromosome",
            ErrorCode::LengthMismatch => "symbol and chromosome lengths differ",
            ErrorCode::MissingField => "input row is missing a field",
            ErrorCode::ColumnNotFound => "required column not found",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::TsvError => "tab-separated parsing error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-gene-matcher operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneMatchError {
    /// Reference dataset or configuration is missing or malformed
    #[error("Configuration error: {msg}")]
    Configuration {
        msg: String,
        /// More specific code, when known
        code: Option<ErrorCode>,
    },

    /// Batch submission or input file is malformed
    #[error("Invalid input: {msg}")]
    InvalidInput {
        msg: String,
        /// More specific code, when known
        code: Option<ErrorCode>,
    },

    /// No column in an annotation file matches a required pattern
    #[error("No column matches pattern '{pattern}'")]
    ColumnNotFound { pattern: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// Tab-separated reader or writer error
    #[error("TSV error: {msg}")]
    Tsv { msg: String },
}

impl GeneMatchError {
    /// Create a configuration error without a specific code
    pub fn configuration(msg: impl Into<String>) -> Self {
        GeneMatchError::Configuration {
            msg: msg.into(),
            code: None,
        }
    }

    /// Create a configuration error tagged with a specific code
    pub fn configuration_with_code(code: ErrorCode, msg: impl Into<String>) -> Self {
        GeneMatchError::Configuration {
            msg: msg.into(),
            code: Some(code),
        }
    }

    /// Create an invalid-input error without a specific code
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GeneMatchError::InvalidInput {
            msg: msg.into(),
            code: None,
        }
    }

    /// Create an invalid-input error tagged with a specific code
    pub fn invalid_input_with_code(code: ErrorCode, msg: impl Into<String>) -> Self {
        GeneMatchError::InvalidInput {
            msg: msg.into(),
            code: Some(code),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            GeneMatchError::Configuration { code, .. } => code.unwrap_or(ErrorCode::Configuration),
            GeneMatchError::InvalidInput { code, .. } => code.unwrap_or(ErrorCode::MissingField),
            GeneMatchError::ColumnNotFound { .. } => ErrorCode::ColumnNotFound,
            GeneMatchError::Io { .. } => ErrorCode::IoError,
            GeneMatchError::Tsv { .. } => ErrorCode::TsvError,
        }
    }

    /// Format the error prefixed with its code, e.g. `[E3001] No column ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for GeneMatchError {
    fn from(err: std::io::Error) -> Self {
        GeneMatchError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<csv::Error> for GeneMatchError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            return GeneMatchError::Io {
                msg: err.to_string(),
            };
        }
        GeneMatchError::Tsv {
            msg: err.to_string(),
        }
    }
}
