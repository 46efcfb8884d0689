//! Per-joint force rows produced by the generator

use serde::{Deserialize, Serialize};

use crate::export::ExportColumn;
use crate::table::{CellValue, TableRow};

pub const ROW_NUMBER: &str = "Row #";
pub const LOAD_CASE: &str = "Load Case";
pub const JOINT_LABEL: &str = "Joint Label";
pub const VERTICAL_LOAD: &str = "Vertical Load (lbs)";
pub const TRANSVERSE_LOAD: &str = "Transverse Load (lbs)";
pub const LONGITUDINAL_LOAD: &str = "Longitudinal Loads (lbs)";

/// One joint's force at one load case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedForceRow {
    /// 1-based, contiguous across one generation run
    pub row_number: usize,
    pub load_case: String,
    pub joint_label: String,
    /// Vertical load (lbs)
    pub vertical: f64,
    /// Transverse load (lbs)
    pub transverse: f64,
    /// Longitudinal load (lbs)
    pub longitudinal: f64,
}

impl GeneratedForceRow {
    /// Export columns in output order
    pub fn columns() -> Vec<ExportColumn> {
        [
            ROW_NUMBER,
            LOAD_CASE,
            JOINT_LABEL,
            VERTICAL_LOAD,
            TRANSVERSE_LOAD,
            LONGITUDINAL_LOAD,
        ]
        .iter()
        .map(|h| ExportColumn::new(h, h))
        .collect()
    }

    /// Row keyed by the export column names
    pub fn to_table_row(&self) -> TableRow {
        let mut row = TableRow::new();
        row.insert(ROW_NUMBER.to_string(), CellValue::Number(self.row_number as f64));
        row.insert(LOAD_CASE.to_string(), CellValue::text(&self.load_case));
        row.insert(JOINT_LABEL.to_string(), CellValue::text(&self.joint_label));
        row.insert(VERTICAL_LOAD.to_string(), CellValue::Number(self.vertical));
        row.insert(TRANSVERSE_LOAD.to_string(), CellValue::Number(self.transverse));
        row.insert(LONGITUDINAL_LOAD.to_string(), CellValue::Number(self.longitudinal));
        row
    }
}

/// Distinct load case names in first-appearance order
pub fn distinct_load_cases(rows: &[GeneratedForceRow]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for row in rows {
        if !names.contains(&row.load_case.as_str()) {
            names.push(&row.load_case);
        }
    }
    names
}
