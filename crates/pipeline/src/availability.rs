//! Availability join and display.
//!
//! Sums resolved stock across branches per product code, attaches the
//! totals to the ranked products, and renders the user-facing
//! availability label.

use std::collections::HashMap;

use stocklens_types::{RankedProduct, ResolvedStock};

/// Sums `stock_on_hand` across branches for each product code.
///
/// A resolved row with an unknown quantity still marks the product as
/// present in the stock table; it contributes zero to the sum.
#[must_use]
pub fn sum_stock_by_product(resolved: &[ResolvedStock]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for row in resolved {
        let entry = totals.entry(row.product_code.clone()).or_insert(0.0);
        *entry += row.stock_on_hand.unwrap_or(0.0);
    }
    totals
}

/// Fills `stock_on_hand` on each ranked product from the per-code
/// totals. Products absent from the stock table stay `None`, which is
/// distinct from a known zero.
pub fn join_stock(ranked: &mut [RankedProduct], totals: &HashMap<String, f64>) {
    for product in ranked {
        product.stock_on_hand = totals.get(&product.product_code).copied();
    }
}

/// Renders the availability label shown next to a product.
///
/// Unknown and non-positive quantities both read as out of stock.
/// Fractional quantities are truncated toward zero, so 2.7 reads as
/// "2 pcs available".
#[must_use]
pub fn availability_display(stock_on_hand: Option<f64>) -> String {
    match stock_on_hand {
        Some(qty) if qty > 0.0 => {
            #[allow(clippy::cast_possible_truncation)]
            let whole = qty.trunc() as i64;
            format!("{whole} pcs available")
        }
        _ => "Out of Stock".to_string(),
    }
}
