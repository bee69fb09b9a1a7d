//! Custom error types for the converter
//!
//! This module defines the error hierarchy for conversion runs using
//! thiserror for ergonomic error definitions. Every error aborts the run;
//! there is no per-row recovery.

use thiserror::Error;

/// The main error type for conversion operations
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Input undecodable or output unencodable
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Malformed field in a source row (row 1 is the header row)
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// Invalid date bound or bound ordering
    #[error("Configuration error: {0}")]
    Config(String),

    /// File open/read/write failures
    #[error("I/O error: {0}")]
    Io(String),
}

impl ConvertError {
    /// Create a row-addressed parse error
    pub fn parse(row: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            row,
            message: message.into(),
        }
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for ConvertError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            return Self::Io(err.to_string());
        }
        let row = err.position().map_or(0, |p| p.line() as usize);
        Self::Parse {
            row,
            message: err.to_string(),
        }
    }
}

/// Result type alias for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;
