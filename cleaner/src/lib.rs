//! # Complaints cleaner - DCWP consumer complaints normalization
//!
//! Loads a delimited complaints export, normalizes its dates, amounts and
//! categorical fields, and writes the cleaned table back out.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│    Clean    │────▶│   Writer    │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │  (7 rules)  │     │ (same delim)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use complaints_cleaner::{run, RunOptions};
//!
//! fn main() {
//!     let report = run("data/in.csv", "data/out.csv", &RunOptions::default()).unwrap();
//!     println!("{}", report.summary());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Fixed column names, date window and default paths
//! - [`logs`] - Progress notices
//! - [`models`] - Record table ([`Table`], [`Cell`])
//! - [`parser`] - CSV loading with auto-detection
//! - [`transform`] - Coercions, the cleaning step and the pipeline
//! - [`writer`] - CSV output

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// I/O
pub mod parser;
pub mod writer;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError,
    PipelineError,
    PipelineResult,
    TransformError,
    WriteError,
};

// =============================================================================
// Re-exports - Models and configuration
// =============================================================================

pub use config::{CleanOptions, RunOptions};
pub use models::{Cell, Row, Table};

// =============================================================================
// Re-exports - Parsing and writing
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    parse_bytes_auto,
    parse_csv_file,
    parse_str,
    ParseResult,
};

pub use writer::{write_csv_file, write_table};

// =============================================================================
// Re-exports - Cleaning
// =============================================================================

pub use transform::{
    clean_data,
    parse_date,
    parse_datetime,
    parse_number,
    CleanReport,
};

pub use transform::pipeline::{run, write_report};
