//! clean-complaints - normalize a DCWP consumer complaints export
//!
//! ```bash
//! clean-complaints                      # data/DCWP_Consumer_Complaints_20250428.csv
//!                                       #   -> data/cleaned_consumer_complaints.csv
//! clean-complaints --input raw.csv --output clean.csv
//! clean-complaints --report report.json --quiet
//! ```

use clap::Parser;
use complaints_cleaner::config::{default_input_path, default_output_path};
use complaints_cleaner::logs::{log_error, set_quiet};
use complaints_cleaner::{run, write_report, RunOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clean-complaints")]
#[command(about = "Clean the DCWP consumer complaints dataset", long_about = None)]
struct Cli {
    /// Input CSV file
    #[arg(short, long, default_value_os_t = default_input_path())]
    input: PathBuf,

    /// Output CSV file
    #[arg(short, long, default_value_os_t = default_output_path())]
    output: PathBuf,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Also save row counts as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Suppress progress notices
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    if let Err(e) = clean(&cli) {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn clean(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = RunOptions {
        delimiter: cli.delimiter,
        ..Default::default()
    };

    let report = run(&cli.input, &cli.output, &options)?;

    if let Some(path) = &cli.report {
        write_report(&report, path)?;
    }

    Ok(())
}
