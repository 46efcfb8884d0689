//! Load case generation
//!
//! Expands each load case record into one force row per joint. The factored
//! pass scales table values from kips to pounds; the optional unfactored pass
//! then divides those loads by the case's overload factors and appends the
//! results as new, renumbered load cases.

use crate::config::GeneratorConfig;
use crate::error::{LoadGenError, LoadGenResult};
use crate::label;
use crate::loads::{
    joint_label, AxisForces, GeneratedForceRow, LoadCaseRecord, OverloadFactorTable,
    KIPS_TO_POUNDS,
};

/// Divisors applied to a load case's pound values
#[derive(Debug, Clone, Copy)]
struct Divisors {
    vertical: f64,
    tension: f64,
}

impl Divisors {
    const FACTORED: Self = Self {
        vertical: 1.0,
        tension: 1.0,
    };

    fn apply(&self, kips: AxisForces) -> AxisForces {
        let pounds = kips.scaled(KIPS_TO_POUNDS);
        AxisForces::new(
            pounds.vertical / self.vertical,
            pounds.transverse / self.tension,
            pounds.longitudinal / self.tension,
        )
    }
}

/// Expands load case records into per-joint force rows
pub struct LoadCaseGenerator<'a> {
    config: &'a GeneratorConfig,
    rows: Vec<GeneratedForceRow>,
}

impl<'a> LoadCaseGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            rows: Vec::new(),
        }
    }

    /// Generate factored rows and, if configured, unfactored rows.
    ///
    /// A zero overload factor on any load case fails the whole call; rows
    /// already produced are discarded.
    pub fn generate(
        mut self,
        load_cases: &[LoadCaseRecord],
        overload_factors: &OverloadFactorTable,
    ) -> LoadGenResult<Vec<GeneratedForceRow>> {
        for case in load_cases {
            self.emit_case(case, &case.label, Divisors::FACTORED);
        }
        let factored = self.rows.len();

        if self.config.generate_unfactored {
            let mut unfactored_cases = 0;
            for case in load_cases {
                let Some(entry) = overload_factors.get(&case.label) else {
                    continue;
                };
                if entry.has_zero() {
                    log::warn!("zero overload factor for load case {:?}", case.label);
                    return Err(LoadGenError::ZeroOverloadFactor(case.label.clone()));
                }
                if entry.is_unity() {
                    continue;
                }

                let number = load_cases.len() + unfactored_cases + 1;
                let name = label::unfactored(number, &case.label);
                let divisors = Divisors {
                    vertical: entry.vertical_olf,
                    tension: entry.tension_olf,
                };
                self.emit_case(case, &name, divisors);
                unfactored_cases += 1;
            }
        }

        log::debug!(
            "generated {} factored and {} unfactored rows from {} load cases",
            factored,
            self.rows.len() - factored,
            load_cases.len()
        );
        Ok(self.rows)
    }

    /// Emit every joint row of one load case under `name`
    fn emit_case(&mut self, case: &LoadCaseRecord, name: &str, divisors: Divisors) {
        let config = self.config;

        let shield = divisors.apply(case.shield);
        for i in 1..=config.num_shields {
            self.push(name, joint_label(&config.shield_label, i, config.num_shields), shield);
        }

        let conductor = divisors.apply(case.conductor);
        for i in 1..=config.num_conductors {
            self.push(
                name,
                joint_label(&config.conductor_label, i, config.num_conductors),
                conductor,
            );
        }

        for spec in config.custom_loads.iter().filter(|s| s.is_active()) {
            let source = |column: &Option<String>| {
                column
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .map_or(0.0, |c| case.field_number(c))
            };
            let kips = AxisForces::new(
                source(&spec.vertical_source),
                source(&spec.transverse_source),
                source(&spec.longitudinal_source),
            );
            let forces = divisors.apply(kips);
            for i in 1..=spec.num_joints {
                self.push(name, joint_label(&spec.joint_label, i, spec.num_joints), forces);
            }
        }
    }

    fn push(&mut self, load_case: &str, joint_label: String, forces: AxisForces) {
        self.rows.push(GeneratedForceRow {
            row_number: self.rows.len() + 1,
            load_case: load_case.to_string(),
            joint_label,
            vertical: forces.vertical,
            transverse: forces.transverse,
            longitudinal: forces.longitudinal,
        });
    }
}

/// Generate force rows for a set of load cases
pub fn generate(
    config: &GeneratorConfig,
    load_cases: &[LoadCaseRecord],
    overload_factors: &OverloadFactorTable,
) -> LoadGenResult<Vec<GeneratedForceRow>> {
    LoadCaseGenerator::new(config).generate(load_cases, overload_factors)
}
