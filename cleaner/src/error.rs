//! Error types for the complaints cleaning pipeline.
//!
//! This module defines a hierarchy of error types, one per stage:
//!
//! - [`CsvError`] - Loading and parsing the input file
//! - [`TransformError`] - Structural problems found by the cleaner
//! - [`WriteError`] - Serializing the cleaned table
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Bad individual values (dates, amounts, empty categories) are never errors;
//! the cleaner neutralizes them in place.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors while reading the input file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Input file missing or unreadable.
    #[error("Cannot read '{}': {source}", path.display())]
    DataAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid delimited data.
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// No header line at all.
    #[error("No columns to parse from file")]
    EmptyFile,
}

impl CsvError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors raised by the cleaner before it touches any row.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column the cleaner works on is absent from the table.
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

// =============================================================================
// Writing Errors
// =============================================================================

/// Errors while writing the cleaned file.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Destination cannot be created or written.
    #[error("Cannot write '{}': {source}", path.display())]
    DataAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on an already open destination.
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serializer failure.
    #[error("CSV write error: {0}")]
    Csv(String),

    /// Delimiter cannot be encoded as a single byte.
    #[error("Delimiter '{0}' is not ASCII")]
    InvalidDelimiter(char),
}

impl From<csv::Error> for WriteError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return WriteError::Csv(err.to_string());
        }
        match err.into_kind() {
            csv::ErrorKind::Io(source) => WriteError::Io(source),
            kind => WriteError::Csv(format!("{:?}", kind)),
        }
    }
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Loading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Cleaning error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Writing error.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Run report could not be saved.
    #[error("Report error: {0}")]
    Report(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Report(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loading operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for cleaning operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for writing operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
