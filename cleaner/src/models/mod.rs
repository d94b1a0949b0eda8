//! Record table model.
//!
//! - [`Cell`] - One typed value (text, number, date, date-time, or missing)
//! - [`Table`] - Named columns plus row-major data, in file order

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{TransformError, TransformResult};

// =============================================================================
// Cell
// =============================================================================

/// A single value in the record table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// Empty field or NA marker.
    Missing,
    /// Raw text, kept verbatim.
    Text(String),
    /// Floating point number.
    Number(f64),
    /// Integer flag or count.
    Integer(i64),
    /// Calendar date.
    Date(NaiveDate),
    /// Date with a time of day.
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Calendar date of a date or date-time cell.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    /// Point in time of a date or date-time cell; plain dates are midnight.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            Cell::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Textual form written to the output file.
    pub fn render(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Integer(i) => i.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        }
    }
}

/// A row, positionally aligned with [`Table::headers`].
pub type Row = Vec<Cell>;

// =============================================================================
// Table
// =============================================================================

/// In-memory record table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Push a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.headers.len(), Cell::Missing);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> TransformResult<usize> {
        self.column_index(name)
            .ok_or_else(|| TransformError::MissingColumn(name.to_string()))
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Replace a column's values, appending the column if it does not exist.
    ///
    /// `values` must hold one cell per row.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.rows.len());
        let idx = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Missing);
                }
                self.headers.len() - 1
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = value;
        }
    }

    /// Rewrite every cell of a column in place.
    pub fn map_column<F>(&mut self, idx: usize, mut f: F)
    where
        F: FnMut(&Cell) -> Cell,
    {
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
    }

    /// Keep only rows for which `keep` returns true.
    pub fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(keep);
    }
}
