//! Load case records, joint definitions, overload factors and force rows

mod force_row;
mod joint;
mod load_case;
mod overload;

pub use force_row::{distinct_load_cases, GeneratedForceRow};
pub use joint::{joint_label, CustomJointLoadSpec};
pub use load_case::{AxisForces, LoadCaseRecord};
pub use overload::{FactorKind, OverloadFactorEntry, OverloadFactorTable};

/// Conversion from the table's kips to output pounds
pub const KIPS_TO_POUNDS: f64 = 1000.0;
