//! End-to-end pipeline tests: uploaded bytes through filtering,
//! ranking, stock resolution and the JSON boundary.

use chrono::NaiveDate;
use proptest::prelude::*;

use stocklens_pipeline::{rank_products, run_analysis, AnalysisSession, DashboardEngine, TOP_N};
use stocklens_types::{AnalysisReport, SalesRecord};

fn sale(branch: &str, code: &str, day: u32, qty: f64) -> SalesRecord {
    SalesRecord {
        product_code: code.to_string(),
        product_description: format!("Product {code}"),
        branch_name: branch.to_string(),
        department: "Lubricants".to_string(),
        sub_department: "Engine Oils".to_string(),
        date_time: NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(11, 0, 0),
        qty_sold: qty,
    }
}

fn request_json(extra: &str) -> String {
    format!(
        r#"{{
            "criteria": {{
                "branches": ["A"],
                "departments": [],
                "sub_departments": [],
                "start": "2024-03-01",
                "end": "2024-03-31"
            }}{extra}
        }}"#
    )
}

const SALES_CSV: &[u8] = b"\
Product_Code,Product_Description,Branch_Name,Department,SubDepartment,Date_Time,Qty_Sold
100,Motor Oil 5W30,A,Lubricants,Engine Oils,2024-03-10 09:00:00,5
100,Motor Oil 5W30,A,Lubricants,Engine Oils,2024-03-12 15:00:00,3
";

const STOCK_CSV: &[u8] = b"\
Product_Code,Product_Description,Branch_Name,Major_Department,Department_Name,Date_Stamp,Stock_on_Hand
100.0,Motor Oil 5W30,A,Lubricants,Engine Oils,2024-03-09,0
";

#[test]
fn test_two_sales_and_zero_stock_read_out_of_stock() {
    let mut session = AnalysisSession::new();
    let json = session
        .run(SALES_CSV, "sales.csv", STOCK_CSV, "stock.csv", &request_json(""))
        .unwrap();

    let report: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert!(report.ok);
    let top = report.top_products.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].qty_sold, 8.0);
    assert_eq!(top[0].availability, "Out of Stock");

    let oos = report.out_of_stock.unwrap();
    assert_eq!(oos.len(), 1);
    assert_eq!(oos[0].branch_name, "A");
}

#[test]
fn test_float_artifact_codes_join_across_tables() {
    // "100.0" in stock and "100" in sales land on the same key.
    let mut session = AnalysisSession::new();
    let stock_csv = String::from_utf8(STOCK_CSV.to_vec())
        .unwrap()
        .replace(",0\n", ",6\n");

    let json = session
        .run(
            SALES_CSV,
            "sales.csv",
            stock_csv.as_bytes(),
            "stock.csv",
            &request_json(""),
        )
        .unwrap();

    let report: AnalysisReport = serde_json::from_str(&json).unwrap();
    let top = report.top_products.unwrap();
    assert_eq!(top[0].product_code, "100");
    assert_eq!(top[0].stock_on_hand, Some(6.0));
    assert_eq!(top[0].availability, "6 pcs available");
}

#[test]
fn test_trend_without_matching_rows_is_a_distinct_signal() {
    let mut session = AnalysisSession::new();
    let request = request_json(
        r#", "trend": {"product_code": "999", "granularity": "day"}"#,
    );

    let json = session
        .run(SALES_CSV, "sales.csv", STOCK_CSV, "stock.csv", &request)
        .unwrap();

    // the bad trend selection is reported per-view, distinct from an
    // all-zero series, and does not blank the valid tables
    let report: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert!(report.ok);
    assert!(report.trend.is_none());
    let trend_error = report.trend_error.unwrap();
    assert_eq!(trend_error.category, "analysis");
    assert!(trend_error.message.contains("999"));

    let top = report.top_products.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].qty_sold, 8.0);
}

#[test]
fn test_trend_series_comes_back_through_json() {
    let mut session = AnalysisSession::new();
    let request = request_json(
        r#", "trend": {"product_code": "100", "granularity": "week"}"#,
    );

    let json = session
        .run(SALES_CSV, "sales.csv", STOCK_CSV, "stock.csv", &request)
        .unwrap();

    let report: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert!(report.ok);
    let trend = report.trend.unwrap();
    assert_eq!(trend.product_code, "100");
    // 2024-03-10 is a Sunday, 2024-03-12 a Tuesday: two week buckets
    assert_eq!(trend.points.len(), 2);
    assert_eq!(
        trend.points[0].bucket_start,
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    );
    assert_eq!(
        trend.points[1].bucket_start,
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
    );
}

#[test]
fn test_criteria_errors_surface_instead_of_degrading() {
    let engine = DashboardEngine::new(vec![sale("A", "100", 10, 1.0)], vec![]);
    let request = request_json("").replace("2024-03-31", "2024-02-01");

    let err = run_analysis(&engine, &request).unwrap_err();
    assert_eq!(err.error_category(), "criteria");
}

proptest! {
    #[test]
    fn prop_ranking_is_bounded_and_non_increasing(
        rows in prop::collection::vec((0u32..500, 0.0f64..1000.0), 0..600)
    ) {
        let sales: Vec<SalesRecord> = rows
            .iter()
            .map(|&(code, qty)| sale("A", &code.to_string(), 10, qty))
            .collect();

        let ranked = rank_products(&sales);
        prop_assert!(ranked.len() <= TOP_N);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].qty_sold >= pair[1].qty_sold);
        }
    }
}
