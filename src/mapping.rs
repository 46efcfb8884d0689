//! Column mapping from extracted headers to canonical load case fields

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::export::ExportColumn;
use crate::loads::{AxisForces, LoadCaseRecord};
use crate::table::TableRow;

/// Canonical semantic fields a load case table can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardField {
    LoadCase,
    CV,
    CT,
    CL,
    SwV,
    SwT,
    SwL,
    WindPsf,
}

impl StandardField {
    /// All fields in declared order
    pub const ALL: [StandardField; 8] = [
        Self::LoadCase,
        Self::CV,
        Self::CT,
        Self::CL,
        Self::SwV,
        Self::SwT,
        Self::SwL,
        Self::WindPsf,
    ];

    /// Display label of the field
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoadCase => "Load Case",
            Self::CV => "C-V",
            Self::CT => "C-T",
            Self::CL => "C-L",
            Self::SwV => "SW-V",
            Self::SwT => "SW-T",
            Self::SwL => "SW-L",
            Self::WindPsf => "WIND (PSF)",
        }
    }
}

/// Mapping value meaning "not mapped"
const UNMAPPED: &str = "none";

/// Canonical field -> actual column name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping(IndexMap<StandardField, String>);

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a field to a column
    pub fn with(mut self, field: StandardField, column: &str) -> Self {
        self.set(field, column);
        self
    }

    pub fn set(&mut self, field: StandardField, column: &str) {
        self.0.insert(field, column.to_string());
    }

    /// Column mapped to a field, ignoring blank and "none" entries
    pub fn column(&self, field: StandardField) -> Option<&str> {
        self.0
            .get(&field)
            .map(String::as_str)
            .filter(|c| !c.is_empty() && *c != UNMAPPED)
    }

    pub fn is_empty(&self) -> bool {
        StandardField::ALL.iter().all(|f| self.column(*f).is_none())
    }

    /// Best-effort default mapping from header names.
    ///
    /// Each field claims the unused header containing its normalised label
    /// with the highest label/header length ratio.
    pub fn auto_detect(headers: &[String]) -> Self {
        let mut mapping = Self::new();
        let mut used: HashSet<&str> = HashSet::new();

        for field in StandardField::ALL {
            let wanted: String = field
                .label()
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();

            let mut best: Option<(&str, f64)> = None;
            for header in headers {
                if used.contains(header.as_str()) {
                    continue;
                }
                let candidate: String = header
                    .to_lowercase()
                    .replace('_', " ")
                    .chars()
                    .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
                    .collect();
                if candidate.is_empty() || !candidate.contains(&wanted) {
                    continue;
                }
                let score = wanted.len() as f64 / candidate.len() as f64;
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((header, score));
                }
            }

            match best {
                Some((header, _)) => {
                    used.insert(header);
                    mapping.set(field, header);
                }
                None => mapping.set(field, UNMAPPED),
            }
        }

        mapping
    }

    /// Columns shown for a mapped table: mapped fields first, then extras
    pub fn display_columns(&self, additional_headers: &[String]) -> Vec<ExportColumn> {
        let mapped = StandardField::ALL
            .iter()
            .filter_map(|f| self.column(*f).map(|c| ExportColumn::new(c, f.label())));
        let extra = additional_headers
            .iter()
            .map(|h| ExportColumn::new(h, &h.replace('_', " ")));
        mapped.chain(extra).collect()
    }
}

/// Turns raw rows into canonical load case records
pub struct FieldMapper<'a> {
    mapping: &'a FieldMapping,
}

impl<'a> FieldMapper<'a> {
    pub fn new(mapping: &'a FieldMapping) -> Self {
        Self { mapping }
    }

    /// Map every row, dropping rows whose label is blank
    pub fn records(&self, rows: &[TableRow]) -> Vec<LoadCaseRecord> {
        rows.iter().filter_map(|row| self.record(row)).collect()
    }

    /// Map one row; `None` when its label is blank
    pub fn record(&self, row: &TableRow) -> Option<LoadCaseRecord> {
        let label = self
            .mapping
            .column(StandardField::LoadCase)
            .and_then(|c| row.get(c))
            .map(|v| v.to_string())
            .unwrap_or_default();
        if label.trim().is_empty() {
            return None;
        }

        let number = |field: StandardField| {
            self.mapping
                .column(field)
                .and_then(|c| row.get(c))
                .map_or(0.0, |v| v.as_number())
        };

        Some(LoadCaseRecord {
            label,
            shield: AxisForces::new(
                number(StandardField::SwV),
                number(StandardField::SwT),
                number(StandardField::SwL),
            ),
            conductor: AxisForces::new(
                number(StandardField::CV),
                number(StandardField::CT),
                number(StandardField::CL),
            ),
            fields: row.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    fn row(pairs: &[(&str, CellValue)]) -> TableRow {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn mapping() -> FieldMapping {
        FieldMapping::new()
            .with(StandardField::LoadCase, "desc")
            .with(StandardField::SwV, "sw_v")
            .with(StandardField::CT, "c_t")
    }

    #[test]
    fn test_records_coerce_numbers() {
        let rows = vec![row(&[
            ("desc", "1. NESC Heavy".into()),
            ("sw_v", CellValue::Number(2.0)),
            ("c_t", "1.25".into()),
        ])];
        let records = FieldMapper::new(&mapping()).records(&rows);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "1. NESC Heavy");
        assert_eq!(records[0].shield.vertical, 2.0);
        assert_eq!(records[0].conductor.transverse, 1.25);
        assert_eq!(records[0].conductor.vertical, 0.0);
        assert_eq!(records[0].fields.len(), 3);
    }

    #[test]
    fn test_blank_labels_are_dropped() {
        let rows = vec![
            row(&[("desc", "   ".into())]),
            row(&[("sw_v", CellValue::Number(1.0))]),
            row(&[("desc", CellValue::Number(250.0)), ("sw_v", "abc".into())]),
        ];
        let records = FieldMapper::new(&mapping()).records(&rows);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "250");
        assert_eq!(records[0].shield.vertical, 0.0);
    }

    #[test]
    fn test_unmapped_label_yields_nothing() {
        let mapping = FieldMapping::new().with(StandardField::LoadCase, "none");
        let rows = vec![row(&[("desc", "Heavy".into())])];
        assert!(FieldMapper::new(&mapping).records(&rows).is_empty());
    }

    #[test]
    fn test_auto_detect() {
        let headers: Vec<String> = ["loadcase", "sw_v_kips", "cv", "wind psf", "notes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mapping = FieldMapping::auto_detect(&headers);

        assert_eq!(mapping.column(StandardField::LoadCase), Some("loadcase"));
        assert_eq!(mapping.column(StandardField::CV), Some("cv"));
        assert_eq!(mapping.column(StandardField::CT), None);
        assert_eq!(mapping.column(StandardField::WindPsf), None);
    }

    #[test]
    fn test_auto_detect_prefers_tighter_match() {
        let headers: Vec<String> = vec!["swl total".into(), "swl".into()];
        let mapping = FieldMapping::auto_detect(&headers);
        assert_eq!(mapping.column(StandardField::SwL), Some("swl"));
    }

    #[test]
    fn test_display_columns() {
        let columns = mapping().display_columns(&["wind_speed".to_string()]);
        let labels: Vec<_> = columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Load Case", "C-T", "SW-V", "wind speed"]);
        assert_eq!(columns[0].key, "desc");
    }
}
