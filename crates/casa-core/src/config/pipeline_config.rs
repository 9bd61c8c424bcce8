//! Pipeline orchestration configuration.

use serde::{Deserialize, Serialize};

use crate::types::Variable;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker threads for per-record and per-group stages. Default: rayon's global pool.
    pub threads: Option<usize>,
    /// Variables analyzed per group. Empty means every variable.
    pub variables: Vec<Variable>,
    /// Variable whose confidence summarizes a group in reports. Default: price_per_area.
    pub primary_variable: Option<Variable>,
}

impl PipelineConfig {
    pub fn effective_variables(&self) -> Vec<Variable> {
        if self.variables.is_empty() {
            Variable::ALL.to_vec()
        } else {
            self.variables.clone()
        }
    }

    pub fn effective_primary_variable(&self) -> Variable {
        self.primary_variable.unwrap_or(Variable::PricePerArea)
    }

    pub(crate) fn merge_from(&mut self, other: &PipelineConfig) {
        if other.threads.is_some() {
            self.threads = other.threads;
        }
        if !other.variables.is_empty() {
            self.variables = other.variables.clone();
        }
        if other.primary_variable.is_some() {
            self.primary_variable = other.primary_variable;
        }
    }
}
