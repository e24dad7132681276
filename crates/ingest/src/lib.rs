//! StockLens Ingest
//!
//! Container detection, CSV/spreadsheet parsing, column harmonization,
//! type coercion, and the content-addressed parse cache.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Content-addressed parse cache.
pub mod cache;
/// Schema-mapping tables and required-column resolution.
pub mod columns;
/// Cell-level coercions (product codes, timestamps, quantities).
pub mod convert;
/// Ingestion error types.
pub mod error;
/// Raw container readers producing typed cell grids.
pub mod sheet;
/// Sheet-to-record loaders for the sales and stock tables.
pub mod tables;

/// Re-export: parse cache keyed by content hash + filename.
pub use cache::{ParseCache, SourceKey};
/// Re-export: ingestion error type.
pub use error::IngestError;
/// Re-export: typed cell value.
pub use sheet::Cell;
/// Re-export: raw parsed table.
pub use sheet::Sheet;
/// Re-export: parse a raw container from bytes.
pub use sheet::read_sheet;
/// Re-export: parse a raw container from a local path.
pub use sheet::read_sheet_from_path;
/// Re-export: parse sales bytes straight to records.
pub use tables::parse_sales;
/// Re-export: parse stock bytes straight to records.
pub use tables::parse_stock;
/// Re-export: load sales records from a parsed sheet.
pub use tables::load_sales;
/// Re-export: load stock snapshots from a parsed sheet.
pub use tables::load_stock;
