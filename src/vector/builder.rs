//! Derivation of the vector load case table

use std::collections::HashMap;

use super::{TemplateSet, VectorColumn, VectorLoadCaseRow, VectorTable, ICE_DENSITY};
use crate::config::VectorConfig;
use crate::label;
use crate::loads::{distinct_load_cases, GeneratedForceRow};
use crate::table::{CellValue, Table, TableRow};

/// Builds a [`VectorTable`] from a primary table and optional secondary table
pub struct VectorTableBuilder<'a> {
    config: &'a VectorConfig,
    primary: &'a Table,
    secondary: Option<&'a Table>,
    templates: TemplateSet,
}

impl<'a> VectorTableBuilder<'a> {
    pub fn new(config: &'a VectorConfig, primary: &'a Table) -> Self {
        Self {
            config,
            primary,
            secondary: None,
            templates: TemplateSet::standard(),
        }
    }

    pub fn with_secondary(mut self, secondary: Option<&'a Table>) -> Self {
        self.secondary = secondary;
        self
    }

    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    /// Build one row per distinct load case.
    ///
    /// Labels come from `generated` when it is non-empty, otherwise from the
    /// primary table's load case column.
    pub fn build(&self, generated: &[GeneratedForceRow]) -> VectorTable {
        let Some(label_column) = self.config.load_case.as_deref().filter(|c| !c.is_empty()) else {
            return VectorTable::default();
        };

        let labels = self.labels(label_column, generated);
        let originals = self.primary_index(label_column);
        let secondary = self.secondary_index();

        let rows: Vec<VectorLoadCaseRow> = labels
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let original = originals.get(label::lookup_key(name)).copied();
                let joined = self.joined_row(original, label_column, &secondary);
                self.row(index, name, original, joined)
            })
            .collect();

        log::debug!(
            "built {} vector load case rows ({} secondary keys)",
            rows.len(),
            secondary.len()
        );
        VectorTable { rows }
    }

    /// Distinct, non-blank labels in first-appearance order
    fn labels(&self, label_column: &str, generated: &[GeneratedForceRow]) -> Vec<String> {
        let source: Vec<String> = if generated.is_empty() {
            self.primary
                .column_values(label_column)
                .flatten()
                .map(CellValue::to_string)
                .collect()
        } else {
            distinct_load_cases(generated)
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        let mut labels: Vec<String> = Vec::new();
        for name in source {
            if !name.trim().is_empty() && !labels.contains(&name) {
                labels.push(name);
            }
        }
        labels
    }

    /// Primary rows keyed by label without sequence prefix; first row wins
    fn primary_index(&self, label_column: &str) -> HashMap<String, &'a TableRow> {
        let primary: &'a Table = self.primary;
        let mut index = HashMap::new();
        for row in &primary.rows {
            let Some(value) = row.get(label_column).filter(|v| !v.is_blank()) else {
                continue;
            };
            let name = value.to_string();
            let base = label::strip_sequence_prefix(&name).trim().to_string();
            index.entry(base).or_insert(row);
        }
        index
    }

    /// Secondary rows keyed by join value; later rows replace earlier ones
    fn secondary_index(&self) -> HashMap<String, &'a TableRow> {
        let mut index = HashMap::new();
        let Some(secondary) = self.secondary.filter(|t| !t.is_empty()) else {
            return index;
        };
        let Some((_, secondary_key)) = self.config.join_keys.pair() else {
            return index;
        };
        for row in &secondary.rows {
            let Some(value) = row.get(secondary_key) else {
                continue;
            };
            let key = value.to_string();
            if !key.is_empty() {
                index.insert(key, row);
            }
        }
        index
    }

    fn joined_row(
        &self,
        original: Option<&TableRow>,
        label_column: &str,
        secondary: &HashMap<String, &'a TableRow>,
    ) -> Option<&'a TableRow> {
        let (primary_key, _) = self.config.join_keys.pair()?;
        let value = original
            .and_then(|row| row.get(primary_key))
            .map(CellValue::to_string)
            .unwrap_or_default();
        let value = if primary_key == label_column {
            label::strip_sequence_prefix(&value)
        } else {
            value.as_str()
        };
        secondary.get(value).copied()
    }

    fn row(
        &self,
        index: usize,
        name: &str,
        original: Option<&TableRow>,
        joined: Option<&TableRow>,
    ) -> VectorLoadCaseRow {
        let mut row = VectorLoadCaseRow {
            values: self.templates.merged(name),
        };
        row.set(VectorColumn::RowNumber, Some(CellValue::Number((index + 1) as f64)));
        row.set(VectorColumn::Description, Some(CellValue::text(name)));
        row.set(
            VectorColumn::WindAreaFactor,
            Some(CellValue::Number(self.config.wind_area_factor)),
        );
        row.set(VectorColumn::IceDensity, Some(CellValue::Number(ICE_DENSITY)));

        let sources = [
            (&self.config.wind, VectorColumn::TransWindPressure),
            (&self.config.dead_load, VectorColumn::DeadLoadFactor),
            (&self.config.ice_thick, VectorColumn::IceThickness),
            (&self.config.temp, VectorColumn::Temperature),
        ];
        for (source, target) in sources {
            let Some(column) = source.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            match joined {
                Some(secondary_row) if self.secondary.is_some_and(|t| t.has_header(column)) => {
                    row.set(target, secondary_row.get(column).cloned());
                }
                _ if self.primary.has_header(column) => {
                    row.set(target, original.and_then(|r| r.get(column)).cloned());
                }
                _ => {}
            }
        }

        row
    }
}
