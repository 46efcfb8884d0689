//! Overload factors

use serde::{Deserialize, Serialize};

use crate::loads::LoadCaseRecord;
use crate::table::parse_finite;

/// Which factor of an entry to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Vertical,
    Tension,
}

/// Overload factors for one load case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadFactorEntry {
    pub load_case: String,
    /// Divides vertical loads
    pub vertical_olf: f64,
    /// Divides transverse and longitudinal loads
    pub tension_olf: f64,
}

impl OverloadFactorEntry {
    pub fn new(load_case: &str, vertical_olf: f64, tension_olf: f64) -> Self {
        Self {
            load_case: load_case.to_string(),
            vertical_olf,
            tension_olf,
        }
    }

    /// Factors of (1, 1)
    pub fn unity(load_case: &str) -> Self {
        Self::new(load_case, 1.0, 1.0)
    }

    pub fn has_zero(&self) -> bool {
        self.vertical_olf == 0.0 || self.tension_olf == 0.0
    }

    /// Unfactored loads would equal the factored ones
    pub fn is_unity(&self) -> bool {
        self.vertical_olf == 1.0 && self.tension_olf == 1.0
    }
}

/// Ordered overload factors, one per load case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverloadFactorTable {
    entries: Vec<OverloadFactorEntry>,
}

impl OverloadFactorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default (1, 1) entry for every record, keyed by its stored label
    pub fn derive(records: &[LoadCaseRecord]) -> Self {
        Self {
            entries: records
                .iter()
                .map(|r| OverloadFactorEntry::unity(&r.label))
                .collect(),
        }
    }

    pub fn from_entries(entries: Vec<OverloadFactorEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[OverloadFactorEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First entry with exactly this label
    pub fn get(&self, load_case: &str) -> Option<&OverloadFactorEntry> {
        self.entries.iter().find(|e| e.load_case == load_case)
    }

    /// Replace the factors of a load case. Returns false when no entry matches.
    pub fn set(&mut self, load_case: &str, vertical_olf: f64, tension_olf: f64) -> bool {
        match self.entries.iter_mut().find(|e| e.load_case == load_case) {
            Some(entry) => {
                entry.vertical_olf = vertical_olf;
                entry.tension_olf = tension_olf;
                true
            }
            None => false,
        }
    }

    /// Edit one factor from user text. Unparseable text stores 0.
    ///
    /// Nothing is validated here; zero factors are rejected at generation time.
    pub fn set_from_text(&mut self, index: usize, kind: FactorKind, text: &str) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        let value = parse_finite(text).unwrap_or(0.0);
        match kind {
            FactorKind::Vertical => entry.vertical_olf = value,
            FactorKind::Tension => entry.tension_olf = value,
        }
        true
    }
}
