//! Fixed run configuration.
//!
//! The column names and date window are constants of the dataset. They live
//! in [`CleanOptions`] so library callers and tests can build variants, but
//! the binary always runs with [`CleanOptions::default`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::path::PathBuf;

/// Directory holding both the raw export and the cleaned file.
pub const DATA_DIR: &str = "data";

/// Raw export file name inside [`DATA_DIR`].
pub const DEFAULT_INPUT: &str = "DCWP_Consumer_Complaints_20250428.csv";

/// Cleaned file name inside [`DATA_DIR`].
pub const DEFAULT_OUTPUT: &str = "cleaned_consumer_complaints.csv";

pub const INTAKE_DATE: &str = "Intake Date";
pub const REFUND_AMOUNT: &str = "Refund Amount";
pub const CONTRACT_CANCELLED_AMOUNT: &str = "Contract Cancelled Amount";
pub const RESULT: &str = "Result";
pub const MONTH: &str = "Month";
pub const TOTAL_COMPENSATION: &str = "Total Compensation";
pub const SATISFACTION: &str = "Satisfaction";

/// Categorical columns that must never be missing after cleaning.
pub const IMPORTANT_COLUMNS: [&str; 7] = [
    "Business Category",
    "Complaint Code",
    "Result",
    "City",
    "State",
    "Postcode",
    "Borough",
];

pub fn default_input_path() -> PathBuf {
    PathBuf::from(DATA_DIR).join(DEFAULT_INPUT)
}

pub fn default_output_path() -> PathBuf {
    PathBuf::from(DATA_DIR).join(DEFAULT_OUTPUT)
}

/// Parameters of the cleaning step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanOptions {
    /// First intake date kept (inclusive)
    pub date_from: NaiveDate,

    /// Last intake date kept (inclusive)
    pub date_to: NaiveDate,

    /// Columns whose missing values get `fill_value`
    pub important_columns: Vec<String>,

    /// Replacement for missing categorical values
    pub fill_value: String,

    /// Substring that marks a satisfied outcome in `Result`
    pub satisfied_marker: String,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            date_from: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or(NaiveDate::MIN),
            date_to: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or(NaiveDate::MAX),
            important_columns: IMPORTANT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            fill_value: "Unknown".to_string(),
            satisfied_marker: "satisfied".to_string(),
        }
    }
}

impl CleanOptions {
    /// Whether `at` falls inside the closed window.
    ///
    /// Both bounds are midnight of their day, so a date-time later on
    /// `date_to` is outside.
    pub fn in_range(&self, at: NaiveDateTime) -> bool {
        at >= self.date_from.and_time(NaiveTime::MIN) && at <= self.date_to.and_time(NaiveTime::MIN)
    }
}

/// Options for a full load → clean → save run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunOptions {
    /// Use this delimiter instead of detecting it
    pub delimiter: Option<char>,

    /// Cleaning parameters
    pub clean: CleanOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        assert_eq!(
            default_input_path(),
            PathBuf::from("data/DCWP_Consumer_Complaints_20250428.csv")
        );
        assert_eq!(
            default_output_path(),
            PathBuf::from("data/cleaned_consumer_complaints.csv")
        );
    }

    #[test]
    fn test_window_is_inclusive() {
        let options = CleanOptions::default();
        let at = |y, m, day, h| NaiveDate::from_ymd_opt(y, m, day).unwrap().and_hms_opt(h, 0, 0).unwrap();
        assert!(options.in_range(at(2022, 1, 1, 0)));
        assert!(options.in_range(at(2023, 12, 31, 0)));
        assert!(options.in_range(at(2023, 12, 30, 23)));
        assert!(!options.in_range(at(2023, 12, 31, 10)));
        assert!(!options.in_range(at(2021, 12, 31, 23)));
        assert!(!options.in_range(at(2024, 1, 1, 0)));
    }

    #[test]
    fn test_default_important_columns() {
        let options = CleanOptions::default();
        assert_eq!(options.important_columns.len(), 7);
        assert!(options.important_columns.contains(&"Borough".to_string()));
        assert_eq!(options.fill_value, "Unknown");
    }
}
