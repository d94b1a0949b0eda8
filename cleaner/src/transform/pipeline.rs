//! High-level pipeline: load, clean, save.
//!
//! # Example
//!
//! ```rust,ignore
//! use complaints_cleaner::config::{default_input_path, default_output_path, RunOptions};
//! use complaints_cleaner::transform::pipeline::run;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run(default_input_path(), default_output_path(), &RunOptions::default())?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

use std::path::Path;

use super::clean::{clean_data, CleanReport};
use crate::config::RunOptions;
use crate::error::{PipelineError, PipelineResult};
use crate::logs::log_info;
use crate::parser::parse_csv_file;
use crate::writer::write_csv_file;

/// Clean `input` into `output`.
///
/// The output uses the same delimiter as the input. Nothing is written when
/// loading or cleaning fails.
pub fn run<I, O>(input: I, output: O, options: &RunOptions) -> PipelineResult<CleanReport>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let parsed = parse_csv_file(input, options.delimiter)?;
    let mut table = parsed.table;

    let report = clean_data(&mut table, &options.clean)?;
    log_info(report.summary());

    write_csv_file(&table, output, parsed.delimiter)?;
    Ok(report)
}

/// Save a run report as pretty JSON.
pub fn write_report<P: AsRef<Path>>(report: &CleanReport, path: P) -> PipelineResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .map_err(|e| PipelineError::Report(format!("{}: {}", path.display(), e)))
}
