use chrono::NaiveDateTime;

/// One sales transaction line, immutable once ingested.
///
/// `product_code` is the join key across both tables and is normalized at
/// ingestion (trailing `".0"` import artifacts stripped) so that codes
/// compare equal as strings regardless of source encoding.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SalesRecord {
    /// Normalized product identity key.
    pub product_code: String,
    /// Human-readable product description.
    pub product_description: String,
    /// Location identity.
    pub branch_name: String,
    /// Organizational grouping (department).
    pub department: String,
    /// Organizational grouping (sub-department).
    pub sub_department: String,
    /// Transaction timestamp; unparsable source values become `None`.
    pub date_time: Option<NaiveDateTime>,
    /// Quantity sold (semantically a count).
    pub qty_sold: f64,
}

/// One point-in-time stock reading at a location, immutable once ingested.
///
/// `department`/`sub_department` are the harmonized names for the source
/// columns `Major_Department`/`Department_Name`; the mapping happens once
/// at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StockSnapshot {
    /// Normalized product identity key (same rules as sales).
    pub product_code: String,
    /// Human-readable product description.
    pub product_description: String,
    /// Location identity.
    pub branch_name: String,
    /// Organizational grouping, harmonized from `Major_Department`.
    pub department: String,
    /// Organizational grouping, harmonized from `Department_Name`.
    pub sub_department: String,
    /// Snapshot timestamp; unparsable source values become `None`.
    pub date_stamp: Option<NaiveDateTime>,
    /// Stock on hand; may be negative, `None` means unknown.
    pub stock_on_hand: Option<f64>,
}

/// The latest known stock snapshot for one (branch, product) pair
/// within the filtered window.
///
/// Tie-break when several snapshots share the maximum `date_stamp`: the
/// one with the highest original row index wins.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedStock {
    /// Location identity.
    pub branch_name: String,
    /// Normalized product identity key.
    pub product_code: String,
    /// Description carried from the winning snapshot.
    pub product_description: String,
    /// Quantity from the winning snapshot; `None` means unknown.
    pub stock_on_hand: Option<f64>,
    /// Timestamp of the winning snapshot.
    pub date_stamp: NaiveDateTime,
}

/// One row of the ranked top-N sales output.
///
/// `stock_on_hand` stays `None` when no resolved stock row exists for the
/// product; absence is never treated as zero for ranking, only for the
/// availability display.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankedProduct {
    /// Normalized product identity key.
    pub product_code: String,
    /// Representative description (first occurring in the group).
    pub product_description: String,
    /// Summed quantity sold over the filtered window.
    pub qty_sold: f64,
    /// Stock summed across resolved snapshots for all selected branches.
    pub stock_on_hand: Option<f64>,
}
