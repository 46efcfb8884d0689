//! Load case records

use serde::{Deserialize, Serialize};

use crate::table::TableRow;

/// Vertical, transverse and longitudinal force components (kips)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisForces {
    pub vertical: f64,
    pub transverse: f64,
    pub longitudinal: f64,
}

impl AxisForces {
    pub fn new(vertical: f64, transverse: f64, longitudinal: f64) -> Self {
        Self {
            vertical,
            transverse,
            longitudinal,
        }
    }

    /// Scale every component by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.vertical * factor,
            self.transverse * factor,
            self.longitudinal * factor,
        )
    }
}

/// One engineering load case after column mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCaseRecord {
    /// Load case label, as stored in the table
    pub label: String,
    /// Load per shield wire
    pub shield: AxisForces,
    /// Load per conductor
    pub conductor: AxisForces,
    /// Every cell of the source row, for custom joint lookups
    #[serde(default)]
    pub fields: TableRow,
}

impl LoadCaseRecord {
    /// Create a record with no passthrough fields
    pub fn new(label: &str, shield: AxisForces, conductor: AxisForces) -> Self {
        Self {
            label: label.to_string(),
            shield,
            conductor,
            fields: TableRow::new(),
        }
    }

    /// Attach a passthrough field
    pub fn with_field(mut self, name: &str, value: impl Into<crate::table::CellValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Numeric value of a passthrough field, 0 when absent or non-numeric
    pub fn field_number(&self, name: &str) -> f64 {
        self.fields.get(name).map_or(0.0, |v| v.as_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_number() {
        let record = LoadCaseRecord::new("Heavy", AxisForces::default(), AxisForces::default())
            .with_field("GUY-V", 1.5)
            .with_field("NOTE", "see sheet 2");
        assert_eq!(record.field_number("GUY-V"), 1.5);
        assert_eq!(record.field_number("NOTE"), 0.0);
        assert_eq!(record.field_number("MISSING"), 0.0);
    }

    #[test]
    fn test_scaled() {
        let forces = AxisForces::new(2.0, 1.0, 0.5).scaled(1000.0);
        assert_eq!(forces, AxisForces::new(2000.0, 1000.0, 500.0));
    }
}
