//! Analysis orchestration.
//!
//! Wires the stage functions into the full report: filter both tables,
//! resolve stock, rank sales, join availability, apply view options and
//! optionally build the trend series.

use tracing::debug;

use stocklens_types::{
    AnalysisReport, FilterCriteria, OutOfStockRow, TopProductRow, TrendRequest, ViewOptions,
};
use stocklens_types::{SalesRecord, StockSnapshot};

use crate::availability::{availability_display, join_stock, sum_stock_by_product};
use crate::error::PipelineError;
use crate::filter::{filter_sales, filter_stock, sales_date_domain};
use crate::ranking::rank_products;
use crate::resolve::resolve_latest_stock;
use crate::trend::build_trend;

/// In-memory analysis engine over one parsed sales table and one parsed
/// stock table.
#[derive(Debug, Clone)]
pub struct DashboardEngine {
    sales: Vec<SalesRecord>,
    stock: Vec<StockSnapshot>,
}

impl DashboardEngine {
    /// Creates an engine over parsed tables.
    #[must_use]
    pub fn new(sales: Vec<SalesRecord>, stock: Vec<StockSnapshot>) -> Self {
        Self { sales, stock }
    }

    /// Number of sales rows held by the engine.
    #[must_use]
    pub fn sales_len(&self) -> usize {
        self.sales.len()
    }

    /// Number of stock rows held by the engine.
    #[must_use]
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    /// Earliest and latest sale dates visible under the non-date parts
    /// of `criteria`. `None` when no matching row has a timestamp.
    #[must_use]
    pub fn date_domain(
        &self,
        criteria: &FilterCriteria,
    ) -> Option<(chrono::NaiveDate, chrono::NaiveDate)> {
        sales_date_domain(&self.sales, criteria)
    }

    /// Runs the full analysis and assembles the report.
    ///
    /// A trend request for a product absent from the filtered sales
    /// does not fail the pass; the report carries the tables plus a
    /// `trend_error` for that view alone.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Criteria`] when the date window is
    /// inverted and [`PipelineError::NoDateDomain`] when the selection
    /// matches rows but none carries a usable date.
    pub fn analyze(
        &self,
        criteria: &FilterCriteria,
        view: &ViewOptions,
        trend: Option<&TrendRequest>,
    ) -> Result<AnalysisReport, PipelineError> {
        if criteria.start > criteria.end {
            return Err(PipelineError::Criteria(format!(
                "start date {} is after end date {}",
                criteria.start, criteria.end
            )));
        }

        // A selection that matches rows but has no usable dates cannot
        // be windowed at all; an empty selection is simply empty.
        let selection_nonempty = self.sales.iter().any(|r| {
            criteria.includes_branch(&r.branch_name)
                && criteria.includes_grouping(&r.department, &r.sub_department)
        });
        if selection_nonempty && sales_date_domain(&self.sales, criteria).is_none() {
            return Err(PipelineError::NoDateDomain);
        }

        let sales = filter_sales(&self.sales, criteria);
        let stock = filter_stock(&self.stock, criteria);
        debug!(
            sales_rows = sales.len(),
            stock_rows = stock.len(),
            "filtered tables"
        );

        let resolved = resolve_latest_stock(&stock);
        let totals = sum_stock_by_product(&resolved);
        let mut ranked = rank_products(&sales);
        join_stock(&mut ranked, &totals);

        let search = view
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase);
        let matches_search = |code: &str| {
            search
                .as_deref()
                .is_none_or(|needle| code.to_ascii_lowercase().contains(needle))
        };

        let top_products: Vec<TopProductRow> = ranked
            .into_iter()
            .filter(|p| matches_search(&p.product_code))
            .filter(|p| !view.out_of_stock_only || p.stock_on_hand.unwrap_or(0.0) <= 0.0)
            .map(|p| TopProductRow {
                availability: availability_display(p.stock_on_hand),
                product_code: p.product_code,
                product_description: p.product_description,
                qty_sold: p.qty_sold,
                stock_on_hand: p.stock_on_hand,
            })
            .collect();

        let out_of_stock: Vec<OutOfStockRow> = resolved
            .iter()
            .filter(|r| r.stock_on_hand.unwrap_or(0.0) <= 0.0)
            .filter(|r| matches_search(&r.product_code))
            .map(|r| OutOfStockRow {
                branch_name: r.branch_name.clone(),
                product_code: r.product_code.clone(),
                product_description: r.product_description.clone(),
                stock_on_hand: r.stock_on_hand,
            })
            .collect();

        // A failed trend selection must not blank the tables computed
        // above; it rides along as a per-view error instead.
        let (trend, trend_error) = match trend {
            Some(req) => match build_trend(&sales, &req.product_code, req.granularity) {
                Ok(series) => (Some(series), None),
                Err(err) => {
                    debug!("trend unavailable: {err}");
                    (None, Some(err.into()))
                }
            },
            None => (None, None),
        };

        Ok(AnalysisReport {
            ok: true,
            error: None,
            top_products: Some(top_products),
            out_of_stock: Some(out_of_stock),
            trend,
            trend_error,
        })
    }
}
