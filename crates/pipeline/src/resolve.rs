//! Stock resolution.
//!
//! Collapses the filtered snapshot table to the latest known reading per
//! (branch, product) pair. When several snapshots share the maximum
//! timestamp the one with the highest original row index wins; the
//! tie-break is part of the contract, not an accident of sort stability.

use std::collections::HashMap;

use stocklens_types::{ResolvedStock, StockSnapshot};

/// Resolves one [`ResolvedStock`] per (branch, product) pair.
///
/// Expects already-filtered input (null `date_stamp` rows were dropped
/// by the filter stage; any that remain are skipped here). Output is
/// sorted by (branch, product) for deterministic downstream iteration.
#[must_use]
pub fn resolve_latest_stock(stock: &[StockSnapshot]) -> Vec<ResolvedStock> {
    // (branch, code) -> index of the winning snapshot
    let mut latest: HashMap<(&str, &str), usize> = HashMap::new();

    for (row_idx, snapshot) in stock.iter().enumerate() {
        let Some(ts) = snapshot.date_stamp else {
            continue;
        };
        let key = (snapshot.branch_name.as_str(), snapshot.product_code.as_str());
        match latest.get(&key) {
            Some(&winner) => {
                let winner_ts = stock[winner].date_stamp.unwrap_or(ts);
                // later row wins on equal timestamps (row_idx > winner)
                if ts >= winner_ts {
                    latest.insert(key, row_idx);
                }
            }
            None => {
                latest.insert(key, row_idx);
            }
        }
    }

    let mut resolved: Vec<ResolvedStock> = latest
        .into_values()
        .map(|idx| {
            let s = &stock[idx];
            ResolvedStock {
                branch_name: s.branch_name.clone(),
                product_code: s.product_code.clone(),
                product_description: s.product_description.clone(),
                stock_on_hand: s.stock_on_hand,
                date_stamp: s.date_stamp.unwrap_or_default(),
            }
        })
        .collect();

    resolved.sort_by(|a, b| {
        (a.branch_name.as_str(), a.product_code.as_str())
            .cmp(&(b.branch_name.as_str(), b.product_code.as_str()))
    });
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(day: u32, hour: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
    }

    fn snapshot(
        branch: &str,
        code: &str,
        date_stamp: Option<NaiveDateTime>,
        qty: Option<f64>,
    ) -> StockSnapshot {
        StockSnapshot {
            product_code: code.to_string(),
            product_description: format!("Product {code}"),
            branch_name: branch.to_string(),
            department: "Dept".to_string(),
            sub_department: "Sub".to_string(),
            date_stamp,
            stock_on_hand: qty,
        }
    }

    #[test]
    fn test_one_row_per_pair_with_max_timestamp() {
        let stock = vec![
            snapshot("A", "100", dt(5, 8), Some(3.0)),
            snapshot("A", "100", dt(9, 8), Some(7.0)),
            snapshot("A", "100", dt(7, 8), Some(5.0)),
            snapshot("B", "100", dt(6, 8), Some(1.0)),
            snapshot("A", "200", dt(6, 8), Some(2.0)),
        ];

        let resolved = resolve_latest_stock(&stock);
        assert_eq!(resolved.len(), 3);

        let a100 = resolved
            .iter()
            .find(|r| r.branch_name == "A" && r.product_code == "100")
            .unwrap();
        assert_eq!(a100.date_stamp, dt(9, 8).unwrap());
        assert_eq!(a100.stock_on_hand, Some(7.0));
    }

    #[test]
    fn test_equal_timestamps_highest_row_index_wins() {
        let stock = vec![
            snapshot("A", "100", dt(5, 8), Some(3.0)),
            snapshot("A", "100", dt(5, 8), Some(9.0)),
        ];

        let resolved = resolve_latest_stock(&stock);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].stock_on_hand, Some(9.0));
    }

    #[test]
    fn test_null_dates_are_skipped() {
        let stock = vec![
            snapshot("A", "100", None, Some(3.0)),
            snapshot("A", "100", dt(5, 8), Some(4.0)),
        ];

        let resolved = resolve_latest_stock(&stock);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].stock_on_hand, Some(4.0));
    }

    #[test]
    fn test_output_is_sorted_by_branch_then_code() {
        let stock = vec![
            snapshot("B", "200", dt(5, 8), Some(1.0)),
            snapshot("A", "300", dt(5, 8), Some(1.0)),
            snapshot("A", "100", dt(5, 8), Some(1.0)),
        ];

        let resolved = resolve_latest_stock(&stock);
        let keys: Vec<(String, String)> = resolved
            .iter()
            .map(|r| (r.branch_name.clone(), r.product_code.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("A".to_string(), "100".to_string()),
                ("A".to_string(), "300".to_string()),
                ("B".to_string(), "200".to_string()),
            ]
        );
    }
}
