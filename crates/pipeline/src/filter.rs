//! Filter stage.
//!
//! Pure narrowing of the two tables to the selected branches, grouping
//! values and date window. Sales test their `date_time`, stock its
//! `date_stamp`; the window is the same, the column is not. Rows with a
//! null timestamp can never satisfy a range test and are excluded.

use chrono::NaiveDate;
use stocklens_types::{FilterCriteria, SalesRecord, StockSnapshot};

/// Narrows sales to the criteria (branch, grouping, inclusive date window).
#[must_use]
pub fn filter_sales(sales: &[SalesRecord], criteria: &FilterCriteria) -> Vec<SalesRecord> {
    let mut null_dates = 0usize;
    let kept: Vec<SalesRecord> = sales
        .iter()
        .filter(|r| {
            criteria.includes_branch(&r.branch_name)
                && criteria.includes_grouping(&r.department, &r.sub_department)
        })
        .filter(|r| match r.date_time {
            Some(ts) => criteria.includes_date(ts.date()),
            None => {
                null_dates += 1;
                false
            }
        })
        .cloned()
        .collect();

    if null_dates > 0 {
        tracing::debug!("dropped {null_dates} sales rows with null Date_Time");
    }

    kept
}

/// Narrows stock snapshots to the criteria (same window, `date_stamp`).
#[must_use]
pub fn filter_stock(stock: &[StockSnapshot], criteria: &FilterCriteria) -> Vec<StockSnapshot> {
    let mut null_dates = 0usize;
    let kept: Vec<StockSnapshot> = stock
        .iter()
        .filter(|s| {
            criteria.includes_branch(&s.branch_name)
                && criteria.includes_grouping(&s.department, &s.sub_department)
        })
        .filter(|s| match s.date_stamp {
            Some(ts) => criteria.includes_date(ts.date()),
            None => {
                null_dates += 1;
                false
            }
        })
        .cloned()
        .collect();

    if null_dates > 0 {
        tracing::debug!("dropped {null_dates} stock rows with null Date_Stamp");
    }

    kept
}

/// Reports the available date domain of the sales table under the
/// non-date parts of the criteria (branch and grouping selection only).
///
/// `None` means no selected row carries a timestamp at all — a date
/// range over this selection is meaningless and the caller must react
/// instead of proceeding with an unbounded window.
#[must_use]
pub fn sales_date_domain(
    sales: &[SalesRecord],
    criteria: &FilterCriteria,
) -> Option<(NaiveDate, NaiveDate)> {
    let mut domain: Option<(NaiveDate, NaiveDate)> = None;
    for record in sales {
        if !criteria.includes_branch(&record.branch_name)
            || !criteria.includes_grouping(&record.department, &record.sub_department)
        {
            continue;
        }
        if let Some(ts) = record.date_time {
            let date = ts.date();
            domain = Some(match domain {
                Some((min, max)) => (min.min(date), max.max(date)),
                None => (date, date),
            });
        }
    }
    domain
}
