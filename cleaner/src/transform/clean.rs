//! The cleaning step.
//!
//! Applies seven column rules to a loaded complaints table, in order:
//!
//! 1. Parse `Intake Date` as a date or date-time (unparseable → missing)
//! 2. Drop rows without an intake date
//! 3. Drop rows outside the configured date window
//! 4. Derive `Month` (`YYYY-MM`)
//! 5. Coerce both amounts to numbers (bad → 0) and derive `Total Compensation`
//! 6. Derive `Satisfaction` (1 when `Result` mentions "satisfied")
//! 7. Fill missing important columns with `Unknown`
//!
//! Individual bad values never fail the step. The only error is a table
//! that lacks one of the columns the rules work on.

use serde::{Deserialize, Serialize};

use super::coerce::{cell_contains, coerce_date, coerce_number, month_label};
use crate::config::{
    CleanOptions, CONTRACT_CANCELLED_AMOUNT, INTAKE_DATE, MONTH, REFUND_AMOUNT, RESULT,
    SATISFACTION, TOTAL_COMPENSATION,
};
use crate::error::TransformResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{Cell, Table};

/// Row counts for one cleaning pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    /// Rows before cleaning
    pub input_rows: usize,
    /// Rows dropped because `Intake Date` did not parse
    pub unparseable_dates: usize,
    /// Rows dropped because `Intake Date` was outside the window
    pub out_of_range: usize,
    /// Rows after cleaning
    pub output_rows: usize,
}

impl CleanReport {
    pub fn dropped(&self) -> usize {
        self.unparseable_dates + self.out_of_range
    }

    pub fn summary(&self) -> String {
        format!(
            "Kept {} of {} rows ({} unparseable dates, {} out of range)",
            self.output_rows, self.input_rows, self.unparseable_dates, self.out_of_range
        )
    }
}

/// Clean a complaints table in place.
///
/// Column order is preserved; derived columns are appended the first time
/// and overwritten in place on later passes.
pub fn clean_data(table: &mut Table, options: &CleanOptions) -> TransformResult<CleanReport> {
    log_info("Starting data cleaning...");

    let date_idx = table.require_column(INTAKE_DATE)?;
    let refund_idx = table.require_column(REFUND_AMOUNT)?;
    let cancelled_idx = table.require_column(CONTRACT_CANCELLED_AMOUNT)?;
    let result_idx = table.require_column(RESULT)?;
    let fill_indices = options
        .important_columns
        .iter()
        .map(|name| table.require_column(name))
        .collect::<TransformResult<Vec<_>>>()?;

    let mut report = CleanReport {
        input_rows: table.len(),
        ..Default::default()
    };

    // 1. Intake Date -> date
    table.map_column(date_idx, coerce_date);

    // 2. Drop unparseable dates
    table.retain_rows(|row| !row[date_idx].is_missing());
    report.unparseable_dates = report.input_rows - table.len();

    // 3. Keep the date window only
    let before_window = table.len();
    table.retain_rows(|row| {
        row[date_idx]
            .as_datetime()
            .map(|at| options.in_range(at))
            .unwrap_or(false)
    });
    report.out_of_range = before_window - table.len();

    // 4. Month
    let months = table
        .rows
        .iter()
        .map(|row| match row[date_idx].as_date() {
            Some(date) => Cell::Text(month_label(date)),
            None => Cell::Missing,
        })
        .collect();
    table.set_column(MONTH, months);

    // 5. Amounts and Total Compensation
    table.map_column(refund_idx, coerce_number);
    table.map_column(cancelled_idx, coerce_number);
    let totals = table
        .rows
        .iter()
        .map(|row| {
            let refund = row[refund_idx].as_number().unwrap_or(0.0);
            let cancelled = row[cancelled_idx].as_number().unwrap_or(0.0);
            Cell::Number(refund + cancelled)
        })
        .collect();
    table.set_column(TOTAL_COMPENSATION, totals);

    // 6. Satisfaction
    let flags = table
        .rows
        .iter()
        .map(|row| Cell::Integer(cell_contains(&row[result_idx], &options.satisfied_marker) as i64))
        .collect();
    table.set_column(SATISFACTION, flags);

    // 7. Fill important columns
    for idx in fill_indices {
        table.map_column(idx, |cell| {
            if cell.is_missing() {
                Cell::text(options.fill_value.as_str())
            } else {
                cell.clone()
            }
        });
    }

    report.output_rows = table.len();

    if report.unparseable_dates > 0 {
        log_info_indent(format!("Dropped {} rows with unparseable dates", report.unparseable_dates), 1);
    }
    if report.out_of_range > 0 {
        log_info_indent(
            format!(
                "Dropped {} rows outside {} .. {}",
                report.out_of_range, options.date_from, options.date_to
            ),
            1,
        );
    }
    if table.is_empty() && report.input_rows > 0 {
        log_warning("No rows left after cleaning");
    }

    log_success("Data cleaning finished.");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IMPORTANT_COLUMNS;
    use crate::error::TransformError;
    use chrono::NaiveDate;

    const HEADERS: &[&str] = &[
        "Record ID",
        "Intake Date",
        "Refund Amount",
        "Contract Cancelled Amount",
        "Result",
        "Business Category",
        "Complaint Code",
        "City",
        "State",
        "Postcode",
        "Borough",
    ];

    fn cell(raw: &str) -> Cell {
        if raw.is_empty() {
            Cell::Missing
        } else {
            Cell::text(raw)
        }
    }

    fn row(id: &str, date: &str, refund: &str, cancelled: &str, result: &str) -> Vec<Cell> {
        vec![
            cell(id),
            cell(date),
            cell(refund),
            cell(cancelled),
            cell(result),
            cell("Home Improvement"),
            cell("C01"),
            cell("Brooklyn"),
            cell("NY"),
            cell("11201"),
            cell("Brooklyn"),
        ]
    }

    fn table(rows: Vec<Vec<Cell>>) -> Table {
        let mut table = Table::new(HEADERS.iter().map(|h| h.to_string()).collect());
        for r in rows {
            table.push_row(r);
        }
        table
    }

    fn sample() -> Table {
        table(vec![
            row("1", "2022-05-15", "100", "", "Customer was Satisfied"),
            row("2", "2021-12-31", "5", "5", "Advised"),
            row("3", "not a date", "5", "5", "Advised"),
            row("4", "12/31/2023", "abc", "20.5", ""),
            row("5", "2024-01-01", "1", "1", "Satisfied"),
            row("6", "", "1", "1", "Satisfied"),
            row("7", "01/01/2022", "-3", "1e2", "Dissatisfied"),
        ])
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_example_row() {
        let mut t = table(vec![{
            let mut r = row("1", "2022-05-15", "100", "", "Customer was Satisfied");
            r[5] = Cell::Missing;
            r
        }]);
        clean_data(&mut t, &CleanOptions::default()).unwrap();

        assert_eq!(t.get(0, "Intake Date"), Some(&Cell::Date(d(2022, 5, 15))));
        assert_eq!(t.get(0, "Month"), Some(&Cell::text("2022-05")));
        assert_eq!(t.get(0, "Refund Amount"), Some(&Cell::Number(100.0)));
        assert_eq!(t.get(0, "Contract Cancelled Amount"), Some(&Cell::Number(0.0)));
        assert_eq!(t.get(0, "Total Compensation"), Some(&Cell::Number(100.0)));
        assert_eq!(t.get(0, "Satisfaction"), Some(&Cell::Integer(1)));
        assert_eq!(t.get(0, "Business Category"), Some(&Cell::text("Unknown")));
    }

    #[test]
    fn test_rows_dropped_and_counted() {
        let mut t = sample();
        let report = clean_data(&mut t, &CleanOptions::default()).unwrap();

        let ids: Vec<String> = t.column("Record ID").unwrap().iter().map(|c| c.render()).collect();
        assert_eq!(ids, vec!["1", "4", "7"]);

        assert_eq!(report.input_rows, 7);
        assert_eq!(report.unparseable_dates, 2);
        assert_eq!(report.out_of_range, 2);
        assert_eq!(report.output_rows, 3);
        assert_eq!(report.input_rows - report.output_rows, report.dropped());
    }

    #[test]
    fn test_invariants_hold_for_every_row() {
        let mut t = sample();
        let options = CleanOptions::default();
        clean_data(&mut t, &options).unwrap();

        for i in 0..t.len() {
            let intake = t.get(i, "Intake Date").unwrap();
            assert!(options.in_range(intake.as_datetime().unwrap()));
            let date = intake.as_date().unwrap();
            assert_eq!(t.get(i, "Month").unwrap().render(), date.format("%Y-%m").to_string());

            let refund = t.get(i, "Refund Amount").and_then(Cell::as_number).unwrap();
            let cancelled = t.get(i, "Contract Cancelled Amount").and_then(Cell::as_number).unwrap();
            let total = t.get(i, "Total Compensation").and_then(Cell::as_number).unwrap();
            assert_eq!(total, refund + cancelled);

            let flag = t.get(i, "Satisfaction").and_then(Cell::as_number).unwrap();
            assert!(flag == 0.0 || flag == 1.0);

            for column in IMPORTANT_COLUMNS {
                assert!(!t.get(i, column).unwrap().is_missing(), "{column} missing");
            }
        }
    }

    #[test]
    fn test_time_of_day_checked_against_window_end() {
        let mut t = table(vec![
            row("1", "2022-06-01 10:00:00", "1", "1", "Advised"),
            row("2", "2023-12-31 10:00:00", "1", "1", "Advised"),
            row("3", "2023-12-31 00:00:00", "1", "1", "Advised"),
        ]);
        let report = clean_data(&mut t, &CleanOptions::default()).unwrap();

        assert_eq!(report.out_of_range, 1);
        assert_eq!(t.len(), 2);
        let at = d(2022, 6, 1).and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(t.get(0, "Intake Date"), Some(&Cell::DateTime(at)));
        assert_eq!(t.get(0, "Intake Date").unwrap().render(), "2022-06-01 10:00:00");
        assert_eq!(t.get(0, "Month"), Some(&Cell::text("2022-06")));
        assert_eq!(t.get(1, "Record ID"), Some(&Cell::text("3")));
    }

    #[test]
    fn test_amount_coercion() {
        let mut t = sample();
        clean_data(&mut t, &CleanOptions::default()).unwrap();

        // "abc" + 20.5
        assert_eq!(t.get(1, "Refund Amount"), Some(&Cell::Number(0.0)));
        assert_eq!(t.get(1, "Total Compensation"), Some(&Cell::Number(20.5)));
        // -3 + 1e2
        assert_eq!(t.get(2, "Total Compensation"), Some(&Cell::Number(97.0)));
    }

    #[test]
    fn test_satisfaction_is_substring_match() {
        let mut t = sample();
        clean_data(&mut t, &CleanOptions::default()).unwrap();

        assert_eq!(t.get(0, "Satisfaction"), Some(&Cell::Integer(1)));
        // missing Result
        assert_eq!(t.get(1, "Satisfaction"), Some(&Cell::Integer(0)));
        assert_eq!(t.get(1, "Result"), Some(&Cell::text("Unknown")));
        // "Dissatisfied" contains "satisfied"
        assert_eq!(t.get(2, "Satisfaction"), Some(&Cell::Integer(1)));
    }

    #[test]
    fn test_derived_columns_appended_in_order() {
        let mut t = sample();
        clean_data(&mut t, &CleanOptions::default()).unwrap();

        let tail: Vec<&str> = t.headers[HEADERS.len()..].iter().map(String::as_str).collect();
        assert_eq!(tail, vec!["Month", "Total Compensation", "Satisfaction"]);
    }

    #[test]
    fn test_idempotent() {
        let options = CleanOptions::default();
        let mut once = sample();
        clean_data(&mut once, &options).unwrap();

        let mut twice = once.clone();
        let report = clean_data(&mut twice, &options).unwrap();

        assert_eq!(once, twice);
        assert_eq!(report.dropped(), 0);
    }

    #[test]
    fn test_missing_column_is_error_before_mutation() {
        let mut t = Table::new(vec!["Intake Date".into(), "Result".into()]);
        t.push_row(vec![Cell::text("2022-01-01"), Cell::Missing]);
        let before = t.clone();

        let err = clean_data(&mut t, &CleanOptions::default()).unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn(ref c) if c == "Refund Amount"));
        assert_eq!(t, before);
    }

    #[test]
    fn test_empty_table() {
        let mut t = table(vec![]);
        let report = clean_data(&mut t, &CleanOptions::default()).unwrap();
        assert_eq!(report, CleanReport::default());
        assert!(t.headers.contains(&"Satisfaction".to_string()));
    }

    #[test]
    fn test_custom_window() {
        let options = CleanOptions {
            date_from: d(2023, 1, 1),
            date_to: d(2023, 12, 31),
            ..Default::default()
        };
        let mut t = sample();
        let report = clean_data(&mut t, &options).unwrap();
        assert_eq!(report.output_rows, 1);
        assert_eq!(t.get(0, "Month"), Some(&Cell::text("2023-12")));
    }

    #[test]
    fn test_summary() {
        let report = CleanReport {
            input_rows: 10,
            unparseable_dates: 1,
            out_of_range: 2,
            output_rows: 7,
        };
        assert_eq!(
            report.summary(),
            "Kept 7 of 10 rows (1 unparseable dates, 2 out of range)"
        );
    }
}
