//! Raw container readers.
//!
//! Both supported containers (delimited text, spreadsheet) are parsed
//! into the same [`Sheet`] shape: one header row plus a grid of typed
//! [`Cell`] values, so downstream coercion never cares where a table
//! came from.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDateTime;

use crate::error::IngestError;

/// A single parsed cell.
///
/// Spreadsheet cells keep their native type (numbers, datetimes) so that
/// numeric product codes and date cells survive without a lossy round
/// trip through text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank cell.
    Empty,
    /// Textual value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Spreadsheet-native datetime value.
    DateTime(NaiveDateTime),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Returns `true` for blank cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// One uniformly-shaped raw table: header names plus typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Column header names, in source order.
    pub headers: Vec<String>,
    /// Data rows; every row has exactly `headers.len()` cells.
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Finds the index of a column by header name.
    ///
    /// Header matching ignores surrounding whitespace and ASCII case,
    /// which absorbs the usual export sloppiness without guessing.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parses raw bytes into a [`Sheet`], detecting the container format
/// from the file extension.
///
/// # Errors
/// - [`IngestError::UnsupportedFormat`] for unrecognized extensions.
/// - [`IngestError::Decode`] when text decoding fails entirely.
/// - [`IngestError::Parse`] for structurally malformed content.
/// - [`IngestError::Empty`] when no data rows exist after the header.
pub fn read_sheet(bytes: &[u8], filename: &str) -> Result<Sheet, IngestError> {
    match extension(filename).as_deref() {
        Some("csv") => read_csv(bytes),
        Some("xlsx" | "xls") => read_spreadsheet(bytes),
        Some(other) => Err(IngestError::UnsupportedFormat(format!(".{other}"))),
        None => Err(IngestError::UnsupportedFormat(format!(
            "no extension: {filename}"
        ))),
    }
}

/// Reads and parses a local file (useful for non-upload callers).
///
/// # Errors
/// - [`IngestError::FileNotFound`] when the file cannot be read.
/// - Everything [`read_sheet`] can return.
pub fn read_sheet_from_path(path: &Path) -> Result<Sheet, IngestError> {
    let bytes = std::fs::read(path)
        .map_err(|e| IngestError::FileNotFound(path.display().to_string(), e.to_string()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    read_sheet(&bytes, &filename)
}

fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// Decodes CSV bytes as UTF-8, falling back to Latin-1.
///
/// Latin-1 is total over bytes, so the fallback only refuses content
/// that is clearly not text at all (embedded NUL bytes).
fn decode_text(bytes: &[u8]) -> Result<String, IngestError> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    if bytes.contains(&0) {
        return Err(IngestError::Decode(
            "content is not valid UTF-8 or Latin-1 text".to_string(),
        ));
    }

    tracing::debug!("UTF-8 decode failed, falling back to Latin-1");
    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}

fn read_csv(bytes: &[u8]) -> Result<Sheet, IngestError> {
    let text = decode_text(bytes)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(IngestError::Empty);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Parse(e.to_string()))?;
        let mut row: Vec<Cell> = record
            .iter()
            .map(|field| {
                let field = field.trim();
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        row.resize(headers.len(), Cell::Empty);
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(IngestError::Empty);
    }

    Ok(Sheet { headers, rows })
}

fn read_spreadsheet(bytes: &[u8]) -> Result<Sheet, IngestError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| IngestError::Parse(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::Parse("workbook has no worksheets".to_string()))?
        .map_err(|e| IngestError::Parse(e.to_string()))?;

    let mut row_iter = range.rows();
    let headers: Vec<String> = row_iter
        .next()
        .ok_or(IngestError::Empty)?
        .iter()
        .map(cell_to_header)
        .collect();

    let mut rows = Vec::new();
    for raw in row_iter {
        let mut row: Vec<Cell> = raw.iter().map(convert_cell).collect();
        row.resize(headers.len(), Cell::Empty);
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(IngestError::Empty);
    }

    Ok(Sheet { headers, rows })
}

fn cell_to_header(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.to_string())
            }
        }
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => {
            #[allow(clippy::cast_precision_loss)]
            Cell::Number(*i as f64)
        }
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => dt.as_datetime().map_or(Cell::Empty, Cell::DateTime),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("{e:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_basic() {
        let csv = b"A,B,C\n1,two,3.5\n,,\n4,five,\n";
        let sheet = read_sheet(csv, "input.csv").unwrap();
        assert_eq!(sheet.headers, vec!["A", "B", "C"]);
        // the all-empty row is dropped
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rows[0][1], Cell::Text("two".to_string()));
        assert_eq!(sheet.rows[1][2], Cell::Empty);
    }

    #[test]
    fn test_read_csv_latin1_fallback() {
        // "Crème" encoded in Latin-1; 0xE8 is invalid UTF-8.
        let csv = b"Name\nCr\xE8me\n";
        let sheet = read_sheet(csv, "input.csv").unwrap();
        assert_eq!(sheet.rows[0][0], Cell::Text("Cr\u{e8}me".to_string()));
    }

    #[test]
    fn test_read_rejects_binary_content() {
        let bytes = b"\xFF\xFE\x00\x00binary";
        let err = read_sheet(bytes, "input.csv").unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_sheet(b"whatever", "report.pdf").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(_)));

        let err = read_sheet(b"whatever", "noextension").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_extension_detection_is_case_insensitive() {
        let csv = b"A\n1\n";
        assert!(read_sheet(csv, "INPUT.CSV").is_ok());
    }

    #[test]
    fn test_header_only_csv_is_empty() {
        let err = read_sheet(b"A,B,C\n", "input.csv").unwrap_err();
        assert!(matches!(err, IngestError::Empty));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let sheet = read_sheet(b"A,B,C\n1\n", "input.csv").unwrap();
        assert_eq!(sheet.rows[0].len(), 3);
        assert_eq!(sheet.rows[0][2], Cell::Empty);
    }

    #[test]
    fn test_column_index_ignores_case_and_whitespace() {
        let sheet = read_sheet(b" Product_Code ,Qty\n1,2\n", "input.csv").unwrap();
        assert_eq!(sheet.column_index("product_code"), Some(0));
        assert_eq!(sheet.column_index("QTY"), Some(1));
        assert_eq!(sheet.column_index("Missing"), None);
    }

    #[test]
    fn test_malformed_spreadsheet_is_parse_error() {
        let err = read_sheet(b"this is not a zip archive", "stock.xlsx").unwrap_err();
        assert!(matches!(err, IngestError::Parse(_)));
    }
}
