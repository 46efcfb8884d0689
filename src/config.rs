//! Generation and vector table configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LoadGenResult;
use crate::loads::{CustomJointLoadSpec, OverloadFactorEntry};
use crate::mapping::{FieldMapping, StandardField};
use crate::table::Table;

/// Joint layout and options for load case generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of shield wire joints
    pub num_shields: usize,
    /// Number of conductor joints
    pub num_conductors: usize,
    /// Shield wire joint label
    pub shield_label: String,
    /// Conductor joint label
    pub conductor_label: String,
    /// Extra joint groups
    pub custom_loads: Vec<CustomJointLoadSpec>,
    /// Also emit unfactored load cases
    pub generate_unfactored: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_shields: 1,
            num_conductors: 3,
            shield_label: "SW".to_string(),
            conductor_label: "C".to_string(),
            custom_loads: Vec::new(),
            generate_unfactored: false,
        }
    }
}

impl GeneratorConfig {
    /// Set shield and conductor joint counts
    pub fn with_joints(mut self, num_shields: usize, num_conductors: usize) -> Self {
        self.num_shields = num_shields;
        self.num_conductors = num_conductors;
        self
    }

    /// Set shield and conductor labels
    pub fn with_labels(mut self, shield_label: &str, conductor_label: &str) -> Self {
        self.shield_label = shield_label.to_string();
        self.conductor_label = conductor_label.to_string();
        self
    }

    /// Add a custom joint group
    pub fn with_custom_load(mut self, spec: CustomJointLoadSpec) -> Self {
        self.custom_loads.push(spec);
        self
    }

    /// Enable the unfactored pass
    pub fn with_unfactored(mut self) -> Self {
        self.generate_unfactored = true;
        self
    }
}

/// Primary/secondary column pair used to join the secondary table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinKeys {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl JoinKeys {
    pub fn new(primary: &str, secondary: &str) -> Self {
        Self {
            primary: non_blank(primary),
            secondary: non_blank(secondary),
        }
    }

    /// Both sides configured
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.primary.as_deref(), self.secondary.as_deref()) {
            (Some(p), Some(s)) if !p.is_empty() && !s.is_empty() => Some((p, s)),
            _ => None,
        }
    }
}

/// Source columns and global values for the vector load case table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Column holding the load case description
    pub load_case: Option<String>,
    /// Source of "Trans. Wind Pressure (psf)"
    pub wind: Option<String>,
    /// Source of "Dead Load Factor"
    pub dead_load: Option<String>,
    /// Source of "Ice Thick. (in)"
    pub ice_thick: Option<String>,
    /// Source of "Temperature (deg F)"
    pub temp: Option<String>,
    pub join_keys: JoinKeys,
    /// Applied to every row regardless of template
    pub wind_area_factor: f64,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            load_case: None,
            wind: None,
            dead_load: None,
            ice_thick: None,
            temp: None,
            join_keys: JoinKeys::default(),
            wind_area_factor: 1.0,
        }
    }
}

impl VectorConfig {
    /// Defaults derived from a field mapping.
    ///
    /// The load case and wind columns carry over and the primary join key is
    /// the load case column.
    pub fn from_field_mapping(mapping: &FieldMapping) -> Self {
        let load_case = mapping.column(StandardField::LoadCase).map(str::to_string);
        Self {
            wind: mapping.column(StandardField::WindPsf).map(str::to_string),
            join_keys: JoinKeys {
                primary: load_case.clone(),
                secondary: None,
            },
            load_case,
            ..Self::default()
        }
    }

    pub fn with_load_case(mut self, column: &str) -> Self {
        self.load_case = non_blank(column);
        self
    }

    pub fn with_wind(mut self, column: &str) -> Self {
        self.wind = non_blank(column);
        self
    }

    pub fn with_dead_load(mut self, column: &str) -> Self {
        self.dead_load = non_blank(column);
        self
    }

    pub fn with_ice_thick(mut self, column: &str) -> Self {
        self.ice_thick = non_blank(column);
        self
    }

    pub fn with_temp(mut self, column: &str) -> Self {
        self.temp = non_blank(column);
        self
    }

    pub fn with_join(mut self, primary: &str, secondary: &str) -> Self {
        self.join_keys = JoinKeys::new(primary, secondary);
        self
    }

    pub fn with_wind_area_factor(mut self, factor: f64) -> Self {
        self.wind_area_factor = factor;
        self
    }
}

fn non_blank(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Everything needed to rerun a session, as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    pub table: Table,
    pub secondary_table: Option<Table>,
    pub field_mapping: FieldMapping,
    /// Extra columns shown alongside the mapped ones
    pub additional_headers: Vec<String>,
    /// Number the load case column on load
    pub number_load_cases: bool,
    pub generator: GeneratorConfig,
    /// Overrides applied after the default factors are derived
    pub overload_factors: Vec<OverloadFactorEntry>,
    /// Replaces the vector config derived from the field mapping
    pub vector: Option<VectorConfig>,
}

impl ProjectFile {
    pub fn from_json(text: &str) -> LoadGenResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> LoadGenResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
