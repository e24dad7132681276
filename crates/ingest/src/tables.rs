//! Sheet-to-record loaders.
//!
//! Turns a raw [`Sheet`] into the two typed tables the pipeline works
//! with, applying the schema mapping and cell coercions in one pass.

use stocklens_types::{SalesRecord, StockSnapshot};

use crate::columns::{resolve_columns, SALES_COLUMNS, STOCK_COLUMNS};
use crate::convert::{cell_text, normalize_product_code, parse_quantity, parse_timestamp};
use crate::error::IngestError;
use crate::sheet::{read_sheet, Sheet};

/// Loads sales records from a parsed sheet.
///
/// Rows with unparsable timestamps are kept with `date_time: None` (the
/// filter stage excludes them from date-ranged results); rows with
/// unparsable quantities count as zero sold.
///
/// # Errors
/// - [`IngestError::MissingColumn`] when a required column is absent.
/// - [`IngestError::Empty`] when no rows survive.
pub fn load_sales(sheet: &Sheet) -> Result<Vec<SalesRecord>, IngestError> {
    let idx = resolve_columns(sheet, &SALES_COLUMNS)?;
    let mut records = Vec::with_capacity(sheet.len());
    let mut coerced_dates = 0usize;

    for row in &sheet.rows {
        let date_time = parse_timestamp(&row[idx[5]]);
        if date_time.is_none() && !row[idx[5]].is_empty() {
            coerced_dates += 1;
        }

        records.push(SalesRecord {
            product_code: normalize_product_code(&row[idx[0]]),
            product_description: cell_text(&row[idx[1]]),
            branch_name: cell_text(&row[idx[2]]),
            department: cell_text(&row[idx[3]]),
            sub_department: cell_text(&row[idx[4]]),
            date_time,
            qty_sold: parse_quantity(&row[idx[6]]).unwrap_or(0.0),
        });
    }

    if coerced_dates > 0 {
        tracing::warn!("coerced {coerced_dates} unparsable Date_Time values to null");
    }

    if records.is_empty() {
        return Err(IngestError::Empty);
    }

    Ok(records)
}

/// Loads stock snapshots from a parsed sheet.
///
/// Unknown quantities stay `None` (never silently zero); the grouping
/// columns are harmonized to `department`/`sub_department` through the
/// stock schema mapping.
///
/// # Errors
/// - [`IngestError::MissingColumn`] when a required column is absent.
/// - [`IngestError::Empty`] when no rows survive.
pub fn load_stock(sheet: &Sheet) -> Result<Vec<StockSnapshot>, IngestError> {
    let idx = resolve_columns(sheet, &STOCK_COLUMNS)?;
    let mut snapshots = Vec::with_capacity(sheet.len());
    let mut coerced_dates = 0usize;

    for row in &sheet.rows {
        let date_stamp = parse_timestamp(&row[idx[5]]);
        if date_stamp.is_none() && !row[idx[5]].is_empty() {
            coerced_dates += 1;
        }

        snapshots.push(StockSnapshot {
            product_code: normalize_product_code(&row[idx[0]]),
            product_description: cell_text(&row[idx[1]]),
            branch_name: cell_text(&row[idx[2]]),
            department: cell_text(&row[idx[3]]),
            sub_department: cell_text(&row[idx[4]]),
            date_stamp,
            stock_on_hand: parse_quantity(&row[idx[6]]),
        });
    }

    if coerced_dates > 0 {
        tracing::warn!("coerced {coerced_dates} unparsable Date_Stamp values to null");
    }

    if snapshots.is_empty() {
        return Err(IngestError::Empty);
    }

    Ok(snapshots)
}

/// Convenience: raw bytes straight to sales records.
///
/// # Errors
/// Everything [`read_sheet`] and [`load_sales`] can return.
pub fn parse_sales(bytes: &[u8], filename: &str) -> Result<Vec<SalesRecord>, IngestError> {
    load_sales(&read_sheet(bytes, filename)?)
}

/// Convenience: raw bytes straight to stock snapshots.
///
/// # Errors
/// Everything [`read_sheet`] and [`load_stock`] can return.
pub fn parse_stock(bytes: &[u8], filename: &str) -> Result<Vec<StockSnapshot>, IngestError> {
    load_stock(&read_sheet(bytes, filename)?)
}
