//! Transmission line load cases
//!
//! Turns a tabulated set of structural load cases into:
//! - Per-joint factored force rows for shield wires, conductors and custom joints
//! - Unfactored companion load cases derived from overload factors
//! - A fixed-schema vector load case table filled from templates and a joined
//!   secondary table
//! - CSV, tab separated and XLSX exports
//!
//! ## Example
//! ```rust
//! use tline_loads::prelude::*;
//!
//! let mut row = TableRow::new();
//! row.insert("LOAD CASE".to_string(), CellValue::text("NESC Heavy"));
//! row.insert("SW-V".to_string(), CellValue::Number(2.0));
//! row.insert("C-T".to_string(), CellValue::Number(1.0));
//!
//! let mut project = LoadCaseProject::from_table(Table::from_rows(vec![row]));
//! project.apply_field_mapping(
//!     FieldMapping::new()
//!         .with(StandardField::LoadCase, "LOAD CASE")
//!         .with(StandardField::SwV, "SW-V")
//!         .with(StandardField::CT, "C-T"),
//!     Vec::new(),
//! );
//!
//! // 1 shield wire + 3 conductors
//! let rows = project.generate().unwrap();
//! assert_eq!(rows.len(), 4);
//! assert_eq!(rows[0].load_case, "1. NESC Heavy");
//! assert_eq!(rows[0].vertical, 2000.0);
//!
//! let vector = project.build_vector_table();
//! assert_eq!(vector.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod label;
pub mod loads;
pub mod mapping;
pub mod project;
pub mod table;
pub mod vector;

// Re-export common types
pub mod prelude {
    pub use crate::config::{GeneratorConfig, JoinKeys, ProjectFile, VectorConfig};
    pub use crate::error::{LoadGenError, LoadGenResult};
    pub use crate::export::{to_csv, to_tsv, to_xlsx, ExportColumn, DEFAULT_SHEET_NAME};
    pub use crate::generator::{generate, LoadCaseGenerator};
    pub use crate::loads::{
        AxisForces, CustomJointLoadSpec, FactorKind, GeneratedForceRow, LoadCaseRecord,
        OverloadFactorEntry, OverloadFactorTable,
    };
    pub use crate::mapping::{FieldMapper, FieldMapping, StandardField};
    pub use crate::project::LoadCaseProject;
    pub use crate::table::{CellValue, Extraction, ExtractionResponse, Table, TableExtractor, TableRow};
    pub use crate::vector::{TemplateSet, VectorColumn, VectorLoadCaseRow, VectorTable, VectorTableBuilder};
}

#[cfg(feature = "wasm")]
pub mod wasm;
