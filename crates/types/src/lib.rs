//! StockLens Types
//!
//! Core data structures for the StockLens analysis pipeline.
//! This crate provides the ingested record types, derived entities,
//! filter criteria, the presentation-boundary request, and report types.

#![deny(clippy::all)]

pub mod criteria;
pub mod granularity;
pub mod record;
pub mod report;
pub mod request;

// Re-export main types for convenience
pub use criteria::FilterCriteria;
pub use granularity::{Granularity, ParseGranularityError};
pub use record::{RankedProduct, ResolvedStock, SalesRecord, StockSnapshot};
pub use report::{
    AnalysisReport, ErrorInfo, OutOfStockRow, TopProductRow, TrendPoint, TrendSeries,
};
pub use request::{AnalysisRequest, TrendRequest, ViewOptions};
