//! Analysis pipeline: filtering, ranking, stock resolution and trend
//! aggregation over the parsed sales and stock tables.
//!
//! The crate is pure compute. The presentation layer hands in a
//! [`FilterCriteria`](stocklens_types::FilterCriteria) (or a JSON
//! request via [`run_analysis`] / [`AnalysisSession`]) and gets back a
//! fully assembled [`AnalysisReport`](stocklens_types::AnalysisReport);
//! no stage reads ambient state or mutates its inputs.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Availability join and display labels.
pub mod availability;
/// Analysis orchestration.
pub mod engine;
/// Pipeline error taxonomy.
pub mod error;
/// Criteria filtering and the date domain.
pub mod filter;
/// Top-seller ranking.
pub mod ranking;
/// Latest-snapshot stock resolution.
pub mod resolve;
/// JSON entry points.
pub mod runner;
/// Per-product trend aggregation.
pub mod trend;

/// Re-export: availability label derivation.
pub use availability::availability_display;
/// Re-export: ranked-product stock join.
pub use availability::join_stock;
/// Re-export: per-product stock summation.
pub use availability::sum_stock_by_product;
/// Re-export: the in-memory analysis engine.
pub use engine::DashboardEngine;
/// Re-export: pipeline error type.
pub use error::PipelineError;
/// Re-export: sales filter stage.
pub use filter::filter_sales;
/// Re-export: stock filter stage.
pub use filter::filter_stock;
/// Re-export: available date domain of a selection.
pub use filter::sales_date_domain;
/// Re-export: top-seller ranking stage.
pub use ranking::rank_products;
/// Re-export: ranking cutoff.
pub use ranking::TOP_N;
/// Re-export: latest-snapshot stock resolution.
pub use resolve::resolve_latest_stock;
/// Re-export: JSON analysis entry point.
pub use runner::run_analysis;
/// Re-export: cached dashboard session.
pub use runner::AnalysisSession;
/// Re-export: per-product trend aggregation.
pub use trend::build_trend;
