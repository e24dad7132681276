//! Cell-level coercions.
//!
//! All the "numeric-as-text import artifact" handling lives here:
//! product codes that arrive as floats, timestamps in half a dozen
//! formats, quantities as text. Failed timestamp coercion yields `None`
//! rather than an error; a row with a bad date is demoted, not dropped
//! at parse time.

use chrono::{NaiveDate, NaiveDateTime};

use crate::sheet::Cell;

/// Timestamp formats accepted from textual cells, tried in order.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

/// Date-only formats accepted from textual cells; parsed as midnight.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Coerces a cell to a normalized product code string.
///
/// Numeric cells render without a fractional part when they hold a whole
/// number; textual codes get exactly one trailing `".0"` artifact
/// stripped, and only when the stem contains no other dot (so a real
/// versioned code like `"1.2.0"` is left alone). The result is a fixed
/// point: normalizing twice equals normalizing once.
#[must_use]
pub fn normalize_product_code(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => render_numeric_code(*n),
        Cell::Text(s) => strip_float_artifact(s.trim()),
        Cell::Bool(b) => b.to_string(),
        Cell::DateTime(dt) => dt.to_string(),
        Cell::Empty => String::new(),
    }
}

fn render_numeric_code(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = n as i64;
        whole.to_string()
    } else {
        strip_float_artifact(&n.to_string())
    }
}

fn strip_float_artifact(code: &str) -> String {
    match code.strip_suffix(".0") {
        Some(stem) if !stem.is_empty() && !stem.contains('.') => stem.to_string(),
        _ => code.to_string(),
    }
}

/// Coerces a cell to a timestamp; anything unparsable becomes `None`.
#[must_use]
pub fn parse_timestamp(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => parse_timestamp_text(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_text(s: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Coerces a cell to a number; anything unparsable becomes `None`.
#[must_use]
pub fn parse_quantity(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerces a cell to its textual content (descriptions, branch names).
#[must_use]
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.trim().to_string(),
        Cell::Number(n) => n.to_string(),
        Cell::Bool(b) => b.to_string(),
        Cell::DateTime(dt) => dt.to_string(),
        Cell::Empty => String::new(),
    }
}
