//! User-defined extra joints

use serde::{Deserialize, Serialize};

/// An extra joint group whose loads are read from named record columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomJointLoadSpec {
    /// Joint label; numbered when there is more than one joint
    pub joint_label: String,
    /// Number of joints in the group
    pub num_joints: usize,
    /// Column supplying the vertical load
    #[serde(default)]
    pub vertical_source: Option<String>,
    /// Column supplying the transverse load
    #[serde(default)]
    pub transverse_source: Option<String>,
    /// Column supplying the longitudinal load
    #[serde(default)]
    pub longitudinal_source: Option<String>,
}

impl CustomJointLoadSpec {
    pub fn new(joint_label: &str, num_joints: usize) -> Self {
        Self {
            joint_label: joint_label.to_string(),
            num_joints,
            ..Self::default()
        }
    }

    pub fn with_vertical(mut self, column: &str) -> Self {
        self.vertical_source = Some(column.to_string());
        self
    }

    pub fn with_transverse(mut self, column: &str) -> Self {
        self.transverse_source = Some(column.to_string());
        self
    }

    pub fn with_longitudinal(mut self, column: &str) -> Self {
        self.longitudinal_source = Some(column.to_string());
        self
    }

    /// Blank labels and empty groups generate nothing
    pub fn is_active(&self) -> bool {
        !self.joint_label.trim().is_empty() && self.num_joints > 0
    }
}

/// Joint label for one member of a group of `count`
pub fn joint_label(label: &str, index: usize, count: usize) -> String {
    if count > 1 {
        format!("{}{}", label, index)
    } else {
        label.to_string()
    }
}
