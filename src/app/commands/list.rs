//! Catalog listing.

use crate::domain::{AppError, PackageTarget, Step, catalog};

/// One catalog entry as shown by `--list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSummary {
    pub name: String,
    pub summary: String,
    pub action_count: usize,
}

impl From<&Step> for StepSummary {
    fn from(step: &Step) -> Self {
        Self {
            name: step.name.to_string(),
            summary: step.summary.clone(),
            action_count: step.actions.len(),
        }
    }
}

pub fn execute(target: PackageTarget) -> Result<Vec<StepSummary>, AppError> {
    Ok(catalog::workstation_steps(target)?.iter().map(StepSummary::from).collect())
}
