use chrono::NaiveDate;

use crate::granularity::Granularity;

/// Analysis result container handed to the presentation layer.
///
/// Exactly one recomputation produces one of these; on failure `ok` is
/// `false`, `error` is set, and the payload fields stay empty so the
/// caller can stop rendering instead of showing garbage tables.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisReport {
    /// Success flag
    pub ok: bool,
    /// Error information if not ok
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    /// Ranked top-N products with availability labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_products: Option<Vec<TopProductRow>>,
    /// Per-branch out-of-stock rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_stock: Option<Vec<OutOfStockRow>>,
    /// Trend series for the requested product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendSeries>,
    /// Error of the trend view alone; the tables above are still valid.
    /// Set instead of `trend` when the requested product has no
    /// in-window sales, so one bad selection does not blank the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_error: Option<ErrorInfo>,
}

impl AnalysisReport {
    /// A failed report carrying only the error.
    #[must_use]
    pub fn failure(error: ErrorInfo) -> Self {
        Self {
            ok: false,
            error: Some(error),
            top_products: None,
            out_of_stock: None,
            trend: None,
            trend_error: None,
        }
    }
}

/// Error information in the output contract
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorInfo {
    /// Error category: `input`, `criteria` or `analysis`
    pub category: String,
    /// Human-readable message
    pub message: String,
}

/// One row of the top-N table
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TopProductRow {
    /// Normalized product identity key
    pub product_code: String,
    /// Representative product description
    pub product_description: String,
    /// Summed quantity sold over the filtered window
    pub qty_sold: f64,
    /// Summed resolved stock; absent when no stock record exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_on_hand: Option<f64>,
    /// Display label, e.g. `"Out of Stock"` or `"12 pcs available"`
    pub availability: String,
}

/// One row of the per-branch out-of-stock table
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutOfStockRow {
    /// Location identity
    pub branch_name: String,
    /// Normalized product identity key
    pub product_code: String,
    /// Product description from the resolved snapshot
    pub product_description: String,
    /// Latest known quantity; absent means unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_on_hand: Option<f64>,
}

/// One bucket of the trend series
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrendPoint {
    /// First date of the bucket
    pub bucket_start: NaiveDate,
    /// Quantity sold inside the bucket
    pub qty_sold: f64,
}

/// Time-bucketed sales trend for one product.
///
/// Only buckets with at least one matching sale appear; a product with
/// zero in-window sales never produces an (empty) series — the pipeline
/// signals "no data" distinctly instead.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrendSeries {
    /// Product the series was computed for
    pub product_code: String,
    /// Resolved product description (first occurring sale row)
    pub product_description: String,
    /// Bucket granularity the series was computed with
    pub granularity: Granularity,
    /// Chronologically ordered buckets
    pub points: Vec<TrendPoint>,
}
