//! Vector load case table
//!
//! A fixed 26-column summary of per-load-case analysis parameters, filled
//! from keyword templates, the primary load case table and an optional
//! joined secondary table.

mod builder;
mod columns;
mod template;

pub use builder::VectorTableBuilder;
pub use columns::VectorColumn;
pub use template::{TemplateRule, TemplateSet};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{LoadGenError, LoadGenResult};
use crate::export::ExportColumn;
use crate::table::{parse_finite, CellValue, TableRow};

/// Fixed ice density (lbs/ft^3)
pub const ICE_DENSITY: f64 = 57.0;

/// One row of the vector load case table. Absent columns render empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorLoadCaseRow {
    pub values: BTreeMap<VectorColumn, CellValue>,
}

impl VectorLoadCaseRow {
    pub fn get(&self, column: VectorColumn) -> Option<&CellValue> {
        self.values.get(&column)
    }

    /// Set a column; `None` clears it
    pub fn set(&mut self, column: VectorColumn, value: Option<CellValue>) {
        match value {
            Some(v) => {
                self.values.insert(column, v);
            }
            None => {
                self.values.remove(&column);
            }
        }
    }

    /// Row keyed by header text, in schema order
    pub fn to_table_row(&self) -> TableRow {
        VectorColumn::ALL
            .iter()
            .filter_map(|c| self.get(*c).map(|v| (c.header().to_string(), v.clone())))
            .collect()
    }
}

/// The derived (and possibly hand-edited) vector load case table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorTable {
    pub rows: Vec<VectorLoadCaseRow>,
}

impl VectorTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Export columns for the fixed schema
    pub fn columns() -> Vec<ExportColumn> {
        VectorColumn::ALL
            .iter()
            .map(|c| ExportColumn::new(c.header(), c.header()))
            .collect()
    }

    pub fn to_table_rows(&self) -> Vec<TableRow> {
        self.rows.iter().map(VectorLoadCaseRow::to_table_row).collect()
    }

    /// Apply a hand edit.
    ///
    /// Numeric cells stay numeric when the new text parses as a number;
    /// everything else is stored as text.
    pub fn update_cell(&mut self, row: usize, column: VectorColumn, text: &str) -> LoadGenResult<()> {
        let target = self
            .rows
            .get_mut(row)
            .ok_or(LoadGenError::RowOutOfRange(row))?;
        let was_number = target.get(column).is_some_and(CellValue::is_number);
        let value = match parse_finite(text) {
            Some(v) if was_number => CellValue::Number(v),
            _ => CellValue::text(text),
        };
        target.set(column, Some(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> VectorTable {
        let mut row = VectorLoadCaseRow::default();
        row.set(VectorColumn::RowNumber, Some(CellValue::Number(1.0)));
        row.set(VectorColumn::Description, Some(CellValue::text("1. Heavy")));
        row.set(VectorColumn::DeadLoadFactor, Some(CellValue::Number(1.5)));
        VectorTable { rows: vec![row] }
    }

    #[test]
    fn test_update_numeric_cell() {
        let mut table = table();
        table.update_cell(0, VectorColumn::DeadLoadFactor, "1.1").unwrap();
        assert_eq!(
            table.rows[0].get(VectorColumn::DeadLoadFactor),
            Some(&CellValue::Number(1.1))
        );

        table.update_cell(0, VectorColumn::DeadLoadFactor, "varies").unwrap();
        assert_eq!(
            table.rows[0].get(VectorColumn::DeadLoadFactor),
            Some(&CellValue::text("varies"))
        );
    }

    #[test]
    fn test_update_text_cell_stays_text() {
        let mut table = table();
        table.update_cell(0, VectorColumn::Description, "42").unwrap();
        assert_eq!(
            table.rows[0].get(VectorColumn::Description),
            Some(&CellValue::text("42"))
        );
    }

    #[test]
    fn test_update_out_of_range() {
        let mut table = table();
        let err = table.update_cell(5, VectorColumn::Description, "x").unwrap_err();
        assert!(matches!(err, LoadGenError::RowOutOfRange(5)));
    }

    #[test]
    fn test_table_row_in_schema_order() {
        let row = table().rows[0].to_table_row();
        let keys: Vec<_> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Row #", "Load Case Description", "Dead Load Factor"]);
    }
}
