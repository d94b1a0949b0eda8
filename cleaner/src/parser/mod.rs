//! CSV loader with encoding and delimiter auto-detection.
//!
//! Turns a delimited file into a [`Table`] of text cells. No cleaning rules
//! here: values are kept verbatim, except NA markers which become
//! [`Cell::Missing`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::logs::{log_info, log_info_indent};
use crate::models::{Cell, Table};

/// Field values read as missing.
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed table
    pub table: Table,
    /// Detected encoding
    pub encoding: String,
    /// Detected or requested delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the specified encoding.
///
/// A byte order mark is removed; undecodable sequences become U+FFFD.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let codec = match encoding {
        "utf-8" => encoding_rs::UTF_8,
        "iso-8859-1" => encoding_rs::WINDOWS_1252,
        "windows-1252" => encoding_rs::WINDOWS_1252,
        other => encoding_rs::Encoding::for_label(other.as_bytes()).unwrap_or(encoding_rs::UTF_8),
    };
    codec.decode(bytes).0.into_owned()
}

/// Detect the delimiter by counting occurrences in the header line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Whether a raw field should be read as missing.
pub fn is_na(raw: &str) -> bool {
    NA_VALUES.contains(&raw)
}

/// Rename repeated headers to `name.1`, `name.2`, ...
///
/// A suffix already taken by another header is skipped, so every column
/// ends up with a distinct name.
fn dedupe_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = raw.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();

    raw.into_iter()
        .map(|name| {
            if seen.insert(name.clone()) {
                return name;
            }
            let suffix = next_suffix.entry(name.clone()).or_insert(1);
            let mut candidate = format!("{}.{}", name, suffix);
            while used.contains(&candidate) {
                *suffix += 1;
                candidate = format!("{}.{}", name, suffix);
            }
            *suffix += 1;
            used.insert(candidate.clone());
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

pub(crate) fn delimiter_byte(delimiter: char) -> CsvResult<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CsvError::parse(0, format!("Delimiter '{}' is not ASCII", delimiter)))
    }
}

/// Parse decoded CSV text with an explicit delimiter.
///
/// # Example
/// ```ignore
/// let table = parse_str("City,State\nQueens,NY", ',')?;
/// assert_eq!(table.len(), 1);
/// ```
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let header_record = reader
        .headers()
        .map_err(|e| CsvError::parse(1, format!("Cannot read header: {}", e)))?
        .clone();

    if header_record.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let headers = dedupe_headers(header_record.iter().map(|h| h.to_string()).collect());
    let width = headers.len();
    let mut table = Table::new(headers);

    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
            CsvError::parse(line, e.to_string())
        })?;

        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        if record.len() > width {
            return Err(CsvError::parse(
                line,
                format!("Expected {} fields, saw {}", width, record.len()),
            ));
        }

        let row = record
            .iter()
            .map(|raw| if is_na(raw) { Cell::Missing } else { Cell::text(raw) })
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

/// Parse CSV bytes with auto-detection of encoding and, unless given, delimiter.
pub fn parse_bytes_auto(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    let table = parse_str(&content, delimiter)?;

    Ok(ParseResult {
        table,
        encoding,
        delimiter,
    })
}

/// Load a CSV file into a table.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file("data/complaints.csv", None)?;
/// println!("Delimiter: '{}', rows: {}", result.delimiter, result.table.len());
/// ```
pub fn parse_csv_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<ParseResult> {
    let path = path.as_ref();
    log_info(format!("Loading data from {}...", path.display()));

    let bytes = std::fs::read(path).map_err(|source| CsvError::DataAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let result = parse_bytes_auto(&bytes, delimiter)?;
    log_info_indent(
        format!(
            "{} rows, {} columns ({}, '{}')",
            result.table.len(),
            result.table.headers.len(),
            result.encoding,
            format_delimiter(result.delimiter)
        ),
        1,
    );
    Ok(result)
}

pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
