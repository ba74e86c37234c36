//! API Facade for the application.
//!
//! Glues process environment capture to command execution.

use std::path::Path;

use crate::app::commands::{list, provision};
use crate::app::config::load_config;
use crate::app::context::planning_target;
use crate::app::environment::Environment;
use crate::app::pipeline::RunObserver;

pub use crate::app::commands::list::StepSummary;
pub use crate::app::commands::provision::{PlannedStep, ProvisionOptions, ProvisionOutcome};
pub use crate::domain::AppError;

/// Run (or plan) provisioning with the current process environment.
pub fn provision(
    options: &ProvisionOptions,
    observer: &mut dyn RunObserver,
) -> Result<ProvisionOutcome, AppError> {
    provision_with_env(options, &Environment::from_process(), observer)
}

/// Run (or plan) provisioning with an explicit environment.
pub fn provision_with_env(
    options: &ProvisionOptions,
    env: &Environment,
    observer: &mut dyn RunObserver,
) -> Result<ProvisionOutcome, AppError> {
    provision::execute(options, env, observer)
}

/// List the built-in steps for the configured or detected package manager,
/// falling back to the apt catalog when detection fails.
pub fn list_steps(config: Option<&Path>) -> Result<Vec<StepSummary>, AppError> {
    let env = Environment::from_process();
    let config = load_config(config, &env)?;
    list::execute(planning_target(&config))
}
