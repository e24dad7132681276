//! Schema-mapping tables.
//!
//! Each supported table declares its required source columns and the
//! canonical field they map to, in one place. The sales and stock exports
//! name their organizational grouping differently (`Department` /
//! `SubDepartment` vs `Major_Department` / `Department_Name`); the
//! harmonization happens here, not ad hoc somewhere downstream.

use crate::error::IngestError;
use crate::sheet::Sheet;

/// One entry of a schema-mapping table: source header → canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header name as it appears in the export.
    pub source: &'static str,
    /// Canonical field the column feeds.
    pub field: &'static str,
}

/// Required sales-export columns, in canonical field order:
/// code, description, branch, department, sub-department, timestamp, qty.
pub const SALES_COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec { source: "Product_Code", field: "product_code" },
    ColumnSpec { source: "Product_Description", field: "product_description" },
    ColumnSpec { source: "Branch_Name", field: "branch_name" },
    ColumnSpec { source: "Department", field: "department" },
    ColumnSpec { source: "SubDepartment", field: "sub_department" },
    ColumnSpec { source: "Date_Time", field: "date_time" },
    ColumnSpec { source: "Qty_Sold", field: "qty_sold" },
];

/// Required stock-export columns, same canonical order as sales.
pub const STOCK_COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec { source: "Product_Code", field: "product_code" },
    ColumnSpec { source: "Product_Description", field: "product_description" },
    ColumnSpec { source: "Branch_Name", field: "branch_name" },
    ColumnSpec { source: "Major_Department", field: "department" },
    ColumnSpec { source: "Department_Name", field: "sub_department" },
    ColumnSpec { source: "Date_Stamp", field: "date_stamp" },
    ColumnSpec { source: "Stock_on_Hand", field: "stock_on_hand" },
];

/// Resolves every required column of a mapping table to its index in the
/// sheet, in table order.
///
/// # Errors
/// [`IngestError::MissingColumn`] naming the first absent source column.
pub fn resolve_columns(sheet: &Sheet, specs: &[ColumnSpec]) -> Result<Vec<usize>, IngestError> {
    specs
        .iter()
        .map(|spec| {
            sheet
                .column_index(spec.source)
                .ok_or_else(|| IngestError::MissingColumn(spec.source.to_string()))
        })
        .collect()
}
