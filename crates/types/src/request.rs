use crate::criteria::FilterCriteria;
use crate::granularity::Granularity;

/// Analysis request from the presentation layer.
///
/// One request describes one full recomputation: the filter criteria plus
/// the view-level options of the dashboard (search box, out-of-stock
/// toggle, trend selection).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisRequest {
    /// Filter criteria driving every stage
    pub criteria: FilterCriteria,
    /// View-level options
    #[serde(default)]
    pub view: ViewOptions,
    /// Optional trend view request
    #[serde(default)]
    pub trend: Option<TrendRequest>,
}

/// Presentation-level narrowing applied to the output tables
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ViewOptions {
    /// Case-insensitive substring filter on product codes
    #[serde(default)]
    pub search: Option<String>,
    /// Restrict the top-N table to out-of-stock products
    #[serde(default)]
    pub out_of_stock_only: bool,
}

/// Trend view selection
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TrendRequest {
    /// Product to chart
    pub product_code: String,
    /// Bucket granularity
    pub granularity: Granularity,
}
