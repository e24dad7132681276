use std::io::Write;

use stocklens_ingest::{
    parse_sales, parse_stock, read_sheet_from_path, IngestError, ParseCache,
};
use tempfile::tempdir;

const SALES_CSV: &str = "\
Product_Code,Product_Description,Branch_Name,Department,SubDepartment,Date_Time,Qty_Sold
100.0,Motor Oil 5W30,Station A,Lubricants,Engine Oils,2024-03-15 14:30:00,5
100.0,Motor Oil 5W30,Station A,Lubricants,Engine Oils,2024-03-16 09:00:00,3
200,Wiper Blade,Station B,Accessories,Exterior,2024-03-15 10:00:00,2
";

const STOCK_CSV: &str = "\
Product_Code,Product_Description,Branch_Name,Major_Department,Department_Name,Date_Stamp,Stock_on_Hand
100,Motor Oil 5W30,Station A,Lubricants,Engine Oils,2024-03-14 08:00:00,0
200,Wiper Blade,Station B,Accessories,Exterior,2024-03-14 08:00:00,12
";

#[test]
fn test_load_both_tables_from_disk() {
    let dir = tempdir().unwrap();

    let sales_path = dir.path().join("sales.csv");
    std::fs::File::create(&sales_path)
        .unwrap()
        .write_all(SALES_CSV.as_bytes())
        .unwrap();

    let stock_path = dir.path().join("stock.csv");
    std::fs::File::create(&stock_path)
        .unwrap()
        .write_all(STOCK_CSV.as_bytes())
        .unwrap();

    let sales_sheet = read_sheet_from_path(&sales_path).unwrap();
    assert_eq!(sales_sheet.len(), 3);

    let stock_sheet = read_sheet_from_path(&stock_path).unwrap();
    assert_eq!(stock_sheet.len(), 2);
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let err = read_sheet_from_path(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound(_, _)));
}

#[test]
fn test_codes_join_across_tables_after_normalization() {
    // "100.0" in sales, "100" in stock: both normalize to "100".
    let sales = parse_sales(SALES_CSV.as_bytes(), "sales.csv").unwrap();
    let stock = parse_stock(STOCK_CSV.as_bytes(), "stock.csv").unwrap();

    assert_eq!(sales[0].product_code, "100");
    assert_eq!(stock[0].product_code, "100");
    assert_eq!(sales[0].product_code, stock[0].product_code);
}

#[test]
fn test_cache_survives_filter_changes() {
    let mut cache = ParseCache::new();

    // same upload parsed once per key, however many recomputations happen
    for _ in 0..5 {
        let sales = cache
            .get_or_parse(SALES_CSV.as_bytes(), "sales.csv", parse_sales)
            .unwrap();
        assert_eq!(sales.len(), 3);
    }
    assert_eq!(cache.len(), 1);

    // a changed file content is a new key
    let edited = SALES_CSV.replace(",5\n", ",6\n");
    cache
        .get_or_parse(edited.as_bytes(), "sales.csv", parse_sales)
        .unwrap();
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_unsupported_upload_degrades_to_error_not_panic() {
    let err = parse_sales(b"%PDF-1.4 ...", "sales.pdf").unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(_)));
}
