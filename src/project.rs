//! Load case project - session pipeline container

use serde::{Deserialize, Serialize};

use crate::config::{GeneratorConfig, ProjectFile, VectorConfig};
use crate::error::{LoadGenError, LoadGenResult};
use crate::export::ExportColumn;
use crate::generator::generate;
use crate::label;
use crate::loads::{FactorKind, GeneratedForceRow, LoadCaseRecord, OverloadFactorTable};
use crate::mapping::{FieldMapper, FieldMapping, StandardField};
use crate::table::{CellValue, Table};
use crate::vector::{TemplateSet, VectorColumn, VectorTable, VectorTableBuilder};

/// Inputs and derived tables of one load case session.
///
/// Every derived table is rebuilt by an explicit stage: changing the mapping
/// or the working table rebuilds the overload factors, and the generated and
/// vector tables only change when [`generate`](Self::generate) or
/// [`build_vector_table`](Self::build_vector_table) is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCaseProject {
    /// Table as extracted, before numbering or edits
    pristine: Table,
    /// Working copy the records are mapped from
    table: Table,
    secondary: Option<Table>,
    mapping: FieldMapping,
    additional_headers: Vec<String>,
    /// Joint layout used by `generate`
    pub generator: GeneratorConfig,
    overload_factors: OverloadFactorTable,
    vector_config: VectorConfig,
    templates: TemplateSet,

    #[serde(skip)]
    generated: Vec<GeneratedForceRow>,
    #[serde(skip)]
    vector_table: VectorTable,
}

impl LoadCaseProject {
    /// Start a session from an extracted table
    pub fn from_table(table: Table) -> Self {
        Self {
            pristine: table.clone(),
            table,
            secondary: None,
            mapping: FieldMapping::new(),
            additional_headers: Vec::new(),
            generator: GeneratorConfig::default(),
            overload_factors: OverloadFactorTable::new(),
            vector_config: VectorConfig::default(),
            templates: TemplateSet::standard(),
            generated: Vec::new(),
            vector_table: VectorTable::default(),
        }
    }

    /// Restore a session from a project file.
    ///
    /// Factor overrides are applied after the defaults are derived; entries
    /// naming unknown load cases are ignored.
    pub fn from_project_file(file: ProjectFile) -> Self {
        let mut project = Self::from_table(file.table);
        project.generator = file.generator;
        project.set_mapping(file.field_mapping, file.additional_headers, file.number_load_cases);

        for entry in &file.overload_factors {
            if !project.set_overload_factor(&entry.load_case, entry.vertical_olf, entry.tension_olf) {
                log::debug!("ignoring overload factor for unknown load case {:?}", entry.load_case);
            }
        }
        if let Some(vector) = file.vector {
            project.vector_config = vector;
        }
        project.secondary = file.secondary_table;
        project
    }

    // ========================
    // Accessors
    // ========================

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn pristine_table(&self) -> &Table {
        &self.pristine
    }

    pub fn secondary_table(&self) -> Option<&Table> {
        self.secondary.as_ref()
    }

    pub fn field_mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn overload_factors(&self) -> &OverloadFactorTable {
        &self.overload_factors
    }

    pub fn vector_config(&self) -> &VectorConfig {
        &self.vector_config
    }

    pub fn generated(&self) -> &[GeneratedForceRow] {
        &self.generated
    }

    pub fn vector_table(&self) -> &VectorTable {
        &self.vector_table
    }

    /// Columns shown for the mapped primary table
    pub fn display_columns(&self) -> Vec<ExportColumn> {
        self.mapping.display_columns(&self.additional_headers)
    }

    /// Records mapped from the working table
    pub fn records(&self) -> Vec<LoadCaseRecord> {
        FieldMapper::new(&self.mapping).records(&self.table.rows)
    }

    // ========================
    // Primary table stages
    // ========================

    /// Confirm a field mapping.
    ///
    /// The working table is rebuilt from the pristine one with every load
    /// case label numbered `"{i}. {label}"`, the vector config is reset from
    /// the mapping and the overload factors are rebuilt.
    pub fn apply_field_mapping(&mut self, mapping: FieldMapping, additional_headers: Vec<String>) {
        self.set_mapping(mapping, additional_headers, true);
    }

    fn set_mapping(&mut self, mapping: FieldMapping, additional_headers: Vec<String>, number: bool) {
        self.table = self.pristine.clone();
        if number {
            if let Some(column) = mapping.column(StandardField::LoadCase) {
                number_labels(&mut self.table, column);
            }
        }
        self.vector_config = VectorConfig::from_field_mapping(&mapping);
        self.mapping = mapping;
        self.additional_headers = additional_headers;
        self.rebuild_overload_factors();
    }

    /// Reset every overload factor to (1, 1), one entry per current record
    pub fn rebuild_overload_factors(&mut self) {
        let records = self.records();
        self.overload_factors = OverloadFactorTable::derive(&records);
        log::debug!("rebuilt {} overload factor entries", self.overload_factors.len());
    }

    /// Edit a cell of the working table
    pub fn update_cell(&mut self, row: usize, column: &str, value: impl Into<CellValue>) -> LoadGenResult<()> {
        if !self.table.has_header(column) {
            return Err(LoadGenError::UnknownColumn(column.to_string()));
        }
        let target = self
            .table
            .rows
            .get_mut(row)
            .ok_or(LoadGenError::RowOutOfRange(row))?;
        target.insert(column.to_string(), value.into());
        self.rebuild_overload_factors();
        Ok(())
    }

    /// Append an empty row to the working table
    pub fn add_row(&mut self) {
        self.table.push_empty_row();
        self.rebuild_overload_factors();
    }

    /// Replace the factors of one load case. Returns false when no entry matches.
    pub fn set_overload_factor(&mut self, load_case: &str, vertical_olf: f64, tension_olf: f64) -> bool {
        self.overload_factors.set(load_case, vertical_olf, tension_olf)
    }

    /// Edit one factor from user text
    pub fn set_overload_factor_text(&mut self, index: usize, kind: FactorKind, text: &str) -> bool {
        self.overload_factors.set_from_text(index, kind, text)
    }

    /// Generate force rows from the working table.
    ///
    /// On failure the previously generated rows are cleared.
    pub fn generate(&mut self) -> LoadGenResult<&[GeneratedForceRow]> {
        let records = self.records();
        let result = if records.is_empty() {
            Err(LoadGenError::NoLoadCases)
        } else {
            generate(&self.generator, &records, &self.overload_factors)
        };

        match result {
            Ok(rows) => {
                self.generated = rows;
                Ok(self.generated.as_slice())
            }
            Err(e) => {
                self.generated.clear();
                Err(e)
            }
        }
    }

    // ========================
    // Vector table stages
    // ========================

    pub fn set_secondary_table(&mut self, table: Option<Table>) {
        self.secondary = table;
    }

    pub fn set_vector_config(&mut self, config: VectorConfig) {
        self.vector_config = config;
    }

    /// Reset the vector config to the defaults implied by the field mapping
    pub fn reset_vector_config(&mut self) {
        self.vector_config = VectorConfig::from_field_mapping(&self.mapping);
    }

    pub fn set_templates(&mut self, templates: TemplateSet) {
        self.templates = templates;
    }

    /// Derive the vector table, discarding any hand edits
    pub fn build_vector_table(&mut self) -> &VectorTable {
        self.vector_table = VectorTableBuilder::new(&self.vector_config, &self.table)
            .with_secondary(self.secondary.as_ref())
            .with_templates(self.templates.clone())
            .build(&self.generated);
        &self.vector_table
    }

    /// Hand-edit a vector table cell addressed by header text
    pub fn update_vector_cell(&mut self, row: usize, header: &str, text: &str) -> LoadGenResult<()> {
        let column = VectorColumn::from_header(header)
            .ok_or_else(|| LoadGenError::UnknownColumn(header.to_string()))?;
        self.vector_table.update_cell(row, column, text)
    }
}

/// Prefix every non-blank label cell with its 1-based row index
fn number_labels(table: &mut Table, column: &str) {
    for (i, row) in table.rows.iter_mut().enumerate() {
        let Some(value) = row.get_mut(column) else {
            continue;
        };
        if value.is_blank() {
            continue;
        }
        *value = CellValue::text(label::numbered(i + 1, &value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::CustomJointLoadSpec;
    use crate::table::TableRow;
    use approx::assert_relative_eq;

    fn row(pairs: &[(&str, CellValue)]) -> TableRow {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn extracted() -> Table {
        Table::from_rows(vec![
            row(&[
                ("LOAD_CASE", "NESC Heavy".into()),
                ("SW_V", CellValue::Number(2.0)),
                ("C_T", CellValue::Number(1.5)),
                ("WIND", CellValue::Number(4.0)),
            ]),
            row(&[
                ("LOAD_CASE", "Extreme Wind".into()),
                ("SW_V", CellValue::Number(1.0)),
                ("C_T", CellValue::Number(3.0)),
                ("WIND", CellValue::Number(21.0)),
            ]),
        ])
    }

    fn mapping() -> FieldMapping {
        FieldMapping::new()
            .with(StandardField::LoadCase, "LOAD_CASE")
            .with(StandardField::SwV, "SW_V")
            .with(StandardField::CT, "C_T")
            .with(StandardField::WindPsf, "WIND")
    }

    fn project() -> LoadCaseProject {
        let mut project = LoadCaseProject::from_table(extracted());
        project.apply_field_mapping(mapping(), vec!["NOTES".to_string()]);
        project
    }

    #[test]
    fn test_mapping_numbers_labels() {
        let project = project();
        assert_eq!(project.table().rows[0]["LOAD_CASE"], CellValue::text("1. NESC Heavy"));
        assert_eq!(project.table().rows[1]["LOAD_CASE"], CellValue::text("2. Extreme Wind"));
        assert_eq!(project.pristine_table().rows[0]["LOAD_CASE"], CellValue::text("NESC Heavy"));

        let labels: Vec<_> = project
            .overload_factors()
            .entries()
            .iter()
            .map(|e| e.load_case.as_str())
            .collect();
        assert_eq!(labels, vec!["1. NESC Heavy", "2. Extreme Wind"]);
    }

    #[test]
    fn test_blank_labels_are_not_numbered() {
        let mut table = extracted();
        table.rows.insert(1, row(&[("LOAD_CASE", "  ".into()), ("SW_V", CellValue::Number(9.0))]));
        table.rows.push(row(&[("SW_V", CellValue::Number(7.0))]));
        let mut project = LoadCaseProject::from_table(table);
        project.apply_field_mapping(mapping(), Vec::new());

        let rows = &project.table().rows;
        assert_eq!(rows[1]["LOAD_CASE"], CellValue::text("  "));
        assert_eq!(rows[2]["LOAD_CASE"], CellValue::text("3. Extreme Wind"));
        assert!(rows[3].get("LOAD_CASE").is_none());

        let labels: Vec<_> = project
            .overload_factors()
            .entries()
            .iter()
            .map(|e| e.load_case.as_str())
            .collect();
        assert_eq!(labels, vec!["1. NESC Heavy", "3. Extreme Wind"]);
    }

    #[test]
    fn test_reapplying_mapping_does_not_double_number() {
        let mut project = project();
        project.apply_field_mapping(mapping(), Vec::new());
        assert_eq!(project.table().rows[0]["LOAD_CASE"], CellValue::text("1. NESC Heavy"));
    }

    #[test]
    fn test_mapping_resets_vector_config() {
        let mut project = project();
        project.set_vector_config(VectorConfig::default().with_load_case("other"));
        project.apply_field_mapping(mapping(), Vec::new());
        assert_eq!(project.vector_config().load_case.as_deref(), Some("LOAD_CASE"));
        assert_eq!(project.vector_config().wind.as_deref(), Some("WIND"));
        assert_eq!(project.vector_config().join_keys.primary.as_deref(), Some("LOAD_CASE"));
    }

    #[test]
    fn test_generate_unfactored() {
        let mut project = project();
        project.generator = GeneratorConfig::default().with_joints(1, 1).with_unfactored();
        assert!(project.set_overload_factor("2. Extreme Wind", 1.5, 1.5));

        let rows = project.generate().unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[4].load_case, "3. Extreme Wind UNFACT");
        assert_relative_eq!(rows[4].vertical, 1000.0 / 1.5);
        assert_relative_eq!(rows[5].transverse, 2000.0);
    }

    #[test]
    fn test_generate_error_clears_rows() {
        let mut project = project();
        project.generator = GeneratorConfig::default().with_joints(1, 0).with_unfactored();
        project.generate().unwrap();
        assert_eq!(project.generated().len(), 2);

        assert!(project.set_overload_factor_text(0, FactorKind::Tension, "0"));
        let err = project.generate().unwrap_err();
        assert!(matches!(err, LoadGenError::ZeroOverloadFactor(_)));
        assert!(project.generated().is_empty());
    }

    #[test]
    fn test_generate_without_records() {
        let mut project = LoadCaseProject::from_table(extracted());
        let err = project.generate().unwrap_err();
        assert!(matches!(err, LoadGenError::NoLoadCases));
    }

    #[test]
    fn test_edits_rebuild_factors() {
        let mut project = project();
        project.set_overload_factor("1. NESC Heavy", 2.0, 2.0);
        project.update_cell(0, "LOAD_CASE", "1. NESC Medium").unwrap();
        assert!(project.overload_factors().get("1. NESC Heavy").is_none());
        assert!(project.overload_factors().get("1. NESC Medium").unwrap().is_unity());

        project.add_row();
        assert_eq!(project.table().len(), 3);
        assert_eq!(project.overload_factors().len(), 2);

        assert!(matches!(
            project.update_cell(9, "LOAD_CASE", "x"),
            Err(LoadGenError::RowOutOfRange(9))
        ));
        assert!(matches!(
            project.update_cell(0, "MISSING", "x"),
            Err(LoadGenError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_custom_joint_reads_unmapped_column() {
        let mut project = project();
        project.generator = GeneratorConfig::default()
            .with_joints(0, 0)
            .with_custom_load(CustomJointLoadSpec::new("W", 1).with_transverse("WIND"));
        let rows = project.generate().unwrap();
        assert_eq!(rows[1].joint_label, "W");
        assert_relative_eq!(rows[1].transverse, 21000.0);
    }

    #[test]
    fn test_vector_table_from_generated_rows() {
        let mut project = project();
        project.generator = GeneratorConfig::default().with_joints(1, 3);
        project.generate().unwrap();

        let table = project.build_vector_table();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows[1].get(VectorColumn::TransWindPressure),
            Some(&CellValue::Number(21.0))
        );

        project.update_vector_cell(0, "Temperature (deg F)", "-10").unwrap();
        assert_eq!(
            project.vector_table().rows[0].get(VectorColumn::Temperature),
            Some(&CellValue::Number(-10.0))
        );
        assert!(matches!(
            project.update_vector_cell(0, "Temp", "1"),
            Err(LoadGenError::UnknownColumn(_))
        ));

        project.build_vector_table();
        assert_eq!(
            project.vector_table().rows[0].get(VectorColumn::Temperature),
            Some(&CellValue::Number(0.0))
        );
    }

    #[test]
    fn test_from_project_file() {
        let file = ProjectFile::from_json(
            r#"{
                "table": {"headers": ["desc", "sw_v"],
                          "rows": [{"desc": "Heavy", "sw_v": 2}, {"desc": "Light", "sw_v": 1}]},
                "field_mapping": {"load_case": "desc", "sw_v": "sw_v"},
                "number_load_cases": true,
                "generator": {"num_conductors": 0, "generate_unfactored": true},
                "overload_factors": [
                    {"load_case": "2. Light", "vertical_olf": 2.0, "tension_olf": 1.0},
                    {"load_case": "Nope", "vertical_olf": 3.0, "tension_olf": 3.0}
                ]
            }"#,
        )
        .unwrap();
        let mut project = LoadCaseProject::from_project_file(file);
        let rows = project.generate().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].load_case, "3. Light UNFACT");
        assert_relative_eq!(rows[2].vertical, 500.0);
    }
}
