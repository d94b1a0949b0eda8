//! CSV writer for cleaned tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{WriteError, WriteResult};
use crate::logs::{log_info, log_success};
use crate::models::Table;

/// Serialize a table (header first, no index column) into any writer.
pub fn write_table<W: Write>(table: &Table, writer: W, delimiter: char) -> WriteResult<()> {
    if !delimiter.is_ascii() {
        return Err(WriteError::InvalidDelimiter(delimiter));
    }

    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .from_writer(writer);

    out.write_record(&table.headers)?;
    for row in &table.rows {
        out.write_record(row.iter().map(|cell| cell.render()))?;
    }
    out.flush()?;
    Ok(())
}

/// Write a table to `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn write_csv_file<P: AsRef<Path>>(table: &Table, path: P, delimiter: char) -> WriteResult<()> {
    let path = path.as_ref();
    log_info(format!("Saving cleaned data to {}...", path.display()));

    let file = File::create(path).map_err(|source| WriteError::DataAccess {
        path: path.to_path_buf(),
        source,
    })?;

    write_table(table, file, delimiter).map_err(|e| match e {
        WriteError::Io(source) => WriteError::DataAccess {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    log_success("File saved successfully.");
    Ok(())
}
