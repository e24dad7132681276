//! Pipeline error types.

use stocklens_ingest::IngestError;
use stocklens_types::ErrorInfo;
use thiserror::Error;

/// Errors that can occur while orchestrating one analysis pass.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// JSON request parse error
    #[error("request parse error: {0}")]
    InvalidRequest(String),

    /// Filter criteria validation error
    #[error("criteria error: {0}")]
    Criteria(String),

    /// Ingestion or normalization error
    #[error("input error: {0}")]
    Input(#[from] IngestError),

    /// Every timestamp was null after filtering; a date range is
    /// meaningless over this selection
    #[error("no dates available after filtering")]
    NoDateDomain,

    /// Trend view requested for a product absent from the window.
    /// Distinct from an all-zero series so the caller can explain.
    #[error("no sales for product {0} in the selected window")]
    NoMatchingProduct(String),

    /// Report serialization error
    #[error("report serialization error: {0}")]
    ReportSerialize(String),
}

impl PipelineError {
    /// Returns true when the request itself was malformed (the caller
    /// should fix its input rather than render a degraded report).
    #[must_use]
    pub fn is_criteria_error(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidRequest(_) | PipelineError::Criteria(_)
        )
    }

    /// Returns the error category for the output contract.
    /// Categories: `criteria`, `input`, `analysis`
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            PipelineError::InvalidRequest(_) | PipelineError::Criteria(_) => "criteria",
            PipelineError::Input(_) => "input",
            PipelineError::NoDateDomain
            | PipelineError::NoMatchingProduct(_)
            | PipelineError::ReportSerialize(_) => "analysis",
        }
    }
}

impl From<PipelineError> for ErrorInfo {
    fn from(err: PipelineError) -> Self {
        Self {
            category: err.error_category().to_string(),
            message: err.to_string(),
        }
    }
}
