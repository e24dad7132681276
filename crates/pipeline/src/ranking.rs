//! Product ranking.
//!
//! Groups filtered sales by (code, description) and keeps the top
//! sellers by summed quantity. The composite key is deliberate: the
//! same code with two descriptions ranks as two entries.

use std::collections::HashMap;

use stocklens_types::{RankedProduct, SalesRecord};

/// Number of products kept by [`rank_products`].
pub const TOP_N: usize = 100;

/// Ranks products by total quantity sold, descending, truncated to
/// [`TOP_N`]. Ties keep first-appearance order of the group in the
/// input. `stock_on_hand` is left unset for the join stage.
#[must_use]
pub fn rank_products(sales: &[SalesRecord]) -> Vec<RankedProduct> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<RankedProduct> = Vec::new();

    for record in sales {
        let key = (
            record.product_code.as_str(),
            record.product_description.as_str(),
        );
        match index.get(&key) {
            Some(&i) => groups[i].qty_sold += record.qty_sold,
            None => {
                index.insert(key, groups.len());
                groups.push(RankedProduct {
                    product_code: record.product_code.clone(),
                    product_description: record.product_description.clone(),
                    qty_sold: record.qty_sold,
                    stock_on_hand: None,
                });
            }
        }
    }

    // NaN totals sink to the end so they never displace real sellers.
    groups.sort_by(|a, b| match (a.qty_sold.is_nan(), b.qty_sold.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => b
            .qty_sold
            .partial_cmp(&a.qty_sold)
            .unwrap_or(std::cmp::Ordering::Equal),
    });
    groups.truncate(TOP_N);
    groups
}
