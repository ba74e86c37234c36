//! rigup: provision a Linux developer workstation through an ordered, fail-fast
//! step pipeline.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    PlannedStep, ProvisionOptions, ProvisionOutcome, StepSummary, list_steps, provision,
    provision_with_env,
};
pub use app::{Environment, Pipeline, RunObserver, SilentObserver};
pub use domain::{ActionError, AppError, ExecutionContext, RunReport, RunResult};
pub use ports::Ports;
