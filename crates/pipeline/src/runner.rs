//! JSON entry points.
//!
//! The presentation layer talks to the pipeline through JSON: a request
//! in, a report out. Malformed requests and inverted criteria come back
//! as hard errors (the caller built a bad request); data problems
//! degrade into an `ok: false` report the caller can render.

use tracing::warn;

use stocklens_ingest::{parse_sales, parse_stock, ParseCache};
use stocklens_types::{AnalysisReport, AnalysisRequest, SalesRecord, StockSnapshot};

use crate::engine::DashboardEngine;
use crate::error::PipelineError;

/// Runs one analysis over an already-built engine.
///
/// # Errors
///
/// Returns an error for a malformed request, for criteria errors and
/// when the report cannot be serialized. Analysis and input errors are
/// folded into an `ok: false` report instead.
pub fn run_analysis(engine: &DashboardEngine, request_json: &str) -> Result<String, PipelineError> {
    let request: AnalysisRequest = serde_json::from_str(request_json)
        .map_err(|e| PipelineError::InvalidRequest(e.to_string()))?;

    let report = match engine.analyze(&request.criteria, &request.view, request.trend.as_ref()) {
        Ok(report) => report,
        Err(err) if err.is_criteria_error() => return Err(err),
        Err(err) => {
            warn!("analysis failed: {err}");
            AnalysisReport::failure(err.into())
        }
    };

    serde_json::to_string(&report).map_err(|e| PipelineError::ReportSerialize(e.to_string()))
}

/// One dashboard session: parse caches for both tables plus the JSON
/// analysis entry point.
///
/// Uploads are passed as raw bytes on every call; the caches make the
/// repeated calls of an interactive session parse each upload once.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    sales_cache: ParseCache<Vec<SalesRecord>>,
    stock_cache: ParseCache<Vec<StockSnapshot>>,
}

impl AnalysisSession {
    /// Creates a session with empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses (or reuses) both uploads and runs one analysis.
    ///
    /// # Errors
    ///
    /// Same contract as [`run_analysis`]. Ingest failures are folded
    /// into an `ok: false` report with the `"input"` category.
    pub fn run(
        &mut self,
        sales_bytes: &[u8],
        sales_name: &str,
        stock_bytes: &[u8],
        stock_name: &str,
        request_json: &str,
    ) -> Result<String, PipelineError> {
        let sales = self
            .sales_cache
            .get_or_parse(sales_bytes, sales_name, parse_sales);
        let stock = self
            .stock_cache
            .get_or_parse(stock_bytes, stock_name, parse_stock);

        let (sales, stock) = match (sales, stock) {
            (Ok(sales), Ok(stock)) => (sales, stock),
            (Err(err), _) | (_, Err(err)) => {
                warn!("ingest failed: {err}");
                let report = AnalysisReport::failure(PipelineError::from(err).into());
                return serde_json::to_string(&report)
                    .map_err(|e| PipelineError::ReportSerialize(e.to_string()));
            }
        };

        let engine = DashboardEngine::new(sales.as_ref().clone(), stock.as_ref().clone());
        run_analysis(&engine, request_json)
    }
}
