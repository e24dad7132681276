//! Sales trend aggregation.
//!
//! Buckets the filtered sales of a single product into day, week or
//! month periods. Buckets with no sales are absent from the series
//! rather than emitted as zeros.

use std::collections::BTreeMap;

use stocklens_types::{Granularity, SalesRecord, TrendPoint, TrendSeries};

use crate::error::PipelineError;

/// Builds the quantity-over-time series for one product.
///
/// `sales` is the already-filtered table; rows are matched by exact
/// product code. Null timestamps never reach this stage.
///
/// # Errors
///
/// Returns [`PipelineError::NoMatchingProduct`] when no filtered row
/// carries the requested code.
pub fn build_trend(
    sales: &[SalesRecord],
    product_code: &str,
    granularity: Granularity,
) -> Result<TrendSeries, PipelineError> {
    let mut buckets: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
    let mut description: Option<&str> = None;

    for record in sales {
        if record.product_code != product_code {
            continue;
        }
        let Some(ts) = record.date_time else {
            continue;
        };
        if description.is_none() {
            description = Some(&record.product_description);
        }
        *buckets.entry(granularity.bucket_start(ts.date())).or_insert(0.0) += record.qty_sold;
    }

    let Some(description) = description else {
        return Err(PipelineError::NoMatchingProduct(product_code.to_string()));
    };

    Ok(TrendSeries {
        product_code: product_code.to_string(),
        product_description: description.to_string(),
        granularity,
        points: buckets
            .into_iter()
            .map(|(bucket_start, qty_sold)| TrendPoint {
                bucket_start,
                qty_sold,
            })
            .collect(),
    })
}
