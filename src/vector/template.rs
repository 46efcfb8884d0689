//! Keyword templates of engineering defaults
//!
//! Rules are evaluated in declared order and the first keyword found in the
//! lower-cased load case label wins. Several keywords can match one label
//! (e.g. "rule b w/ olf" contains both "b w/ olf" and "rule b"), so the order
//! of `rules` is the priority.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::VectorColumn;
use crate::table::CellValue;

/// Column defaults applied when a keyword matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRule {
    /// Lower-case substring to look for
    pub keyword: String,
    pub values: Vec<(VectorColumn, CellValue)>,
}

impl TemplateRule {
    pub fn new(keyword: &str, values: Vec<(VectorColumn, CellValue)>) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            values,
        }
    }
}

/// The default rule plus ordered keyword rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSet {
    pub default: Vec<(VectorColumn, CellValue)>,
    pub rules: Vec<TemplateRule>,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::standard()
    }
}

fn num(column: VectorColumn, value: f64) -> (VectorColumn, CellValue) {
    (column, CellValue::Number(value))
}

fn text(column: VectorColumn, value: &str) -> (VectorColumn, CellValue) {
    (column, CellValue::text(value))
}

impl TemplateSet {
    /// NESC / ASCE defaults
    pub fn standard() -> Self {
        use VectorColumn::*;

        let default = vec![
            num(DeadLoadFactor, 1.0),
            num(WindAreaFactor, 1.0),
            num(SfSteelPolesArmsTowers, 1.0),
            num(SfWoodPoles, 0.0),
            num(SfConcreteUltimate, 0.0),
            num(SfConcreteFirstCrack, 0.0),
            num(SfConcreteZeroTension, 0.0),
            num(SfGuysCables, 0.9),
            num(SfNonTubularArms, 1.0),
            num(SfBraces, 1.0),
            num(SfInsulators, 1.0),
            num(SfHardware, 1.0),
            num(SfFoundation, 1.0),
            num(SfClimbing, 0.0),
            text(PointLoads, ""),
            text(WindIceModel, "Wind on All"),
            num(LongitWindPressure, 0.0),
            num(IceThickness, 0.0),
            num(IceDensity, 57.0),
            num(Temperature, 0.0),
            text(PoleDeflectionCheck, "No Limit"),
            num(PoleDeflectionLimit, 0.0),
            num(JointDisplacement, 0.0),
        ];

        let rules = vec![
            TemplateRule::new(
                "b w/ olf",
                vec![
                    num(DeadLoadFactor, 1.5),
                    num(WindAreaFactor, 1.1),
                    num(LongitWindPressure, 10.0),
                    num(IceThickness, 0.5),
                    num(Temperature, 0.0),
                ],
            ),
            TemplateRule::new(
                "rule b",
                vec![
                    num(DeadLoadFactor, 1.5),
                    num(WindAreaFactor, 1.1),
                    num(Temperature, 30.0),
                ],
            ),
            TemplateRule::new(
                "rule c",
                vec![
                    num(DeadLoadFactor, 1.1),
                    num(WindAreaFactor, 1.1),
                    num(Temperature, 60.0),
                ],
            ),
            TemplateRule::new(
                "rule d",
                vec![
                    num(DeadLoadFactor, 1.1),
                    num(WindAreaFactor, 1.1),
                    num(IceThickness, 0.75),
                    num(Temperature, 15.0),
                ],
            ),
            TemplateRule::new(
                "asce",
                vec![
                    num(DeadLoadFactor, 1.0),
                    num(WindAreaFactor, 1.1),
                    num(IceThickness, 1.0),
                    num(Temperature, 32.0),
                ],
            ),
        ];

        Self { default, rules }
    }

    /// First keyword rule contained in the lower-cased label
    pub fn select(&self, label: &str) -> Option<&TemplateRule> {
        let description = label.to_lowercase();
        self.rules
            .iter()
            .find(|rule| !rule.keyword.is_empty() && description.contains(&rule.keyword))
    }

    /// Default values with the selected rule merged on top
    pub fn merged(&self, label: &str) -> BTreeMap<VectorColumn, CellValue> {
        let mut values: BTreeMap<_, _> = self.default.iter().cloned().collect();
        if let Some(rule) = self.select(label) {
            values.extend(rule.values.iter().cloned());
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let templates = TemplateSet::standard();
        let rule = templates.select("2. Rule B w/ OLF").unwrap();
        assert_eq!(rule.keyword, "b w/ olf");

        let rule = templates.select("3. NESC RULE B").unwrap();
        assert_eq!(rule.keyword, "rule b");
    }

    #[test]
    fn test_no_match_uses_default() {
        let templates = TemplateSet::standard();
        assert!(templates.select("Extreme Wind").is_none());
        let values = templates.merged("Extreme Wind");
        assert_eq!(values[&VectorColumn::DeadLoadFactor], CellValue::Number(1.0));
        assert_eq!(values[&VectorColumn::WindIceModel], CellValue::text("Wind on All"));
        assert!(!values.contains_key(&VectorColumn::TransWindPressure));
    }

    #[test]
    fn test_merge_keeps_untouched_defaults() {
        let values = TemplateSet::standard().merged("ASCE 1in ice");
        assert_eq!(values[&VectorColumn::Temperature], CellValue::Number(32.0));
        assert_eq!(values[&VectorColumn::IceThickness], CellValue::Number(1.0));
        assert_eq!(values[&VectorColumn::SfGuysCables], CellValue::Number(0.9));
    }

    #[test]
    fn test_rule_order_is_priority() {
        let mut templates = TemplateSet::standard();
        templates.rules.swap(0, 1);
        assert_eq!(templates.select("Rule B w/ OLF").unwrap().keyword, "rule b");
    }
}
