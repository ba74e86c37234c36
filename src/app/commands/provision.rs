//! The provisioning run, or its dry-run plan.

use std::path::PathBuf;

use crate::adapters::package_manager_command::running_elevated;
use crate::adapters::{
    ChownCommand, CommandArchiveExtractor, CommandPackageManager, Git2Cloner, HttpReleaseFeed,
};
use crate::app::config::load_config;
use crate::app::context::{RunContext, planning_target, resolve_target};
use crate::app::environment::Environment;
use crate::app::pipeline::{Pipeline, RunObserver};
use crate::domain::{AppError, RunReport, catalog};
use crate::ports::Ports;

/// Options for a provisioning run.
#[derive(Debug, Clone, Default)]
pub struct ProvisionOptions {
    /// Run only this step.
    pub only: Option<String>,
    /// Shorthand for `only = Some("neovim")`.
    pub neovim_only: bool,
    pub dist_root: Option<PathBuf>,
    pub home: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Print the plan without executing it.
    pub dry_run: bool,
}

/// A scheduled step with its rendered actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub name: String,
    pub actions: Vec<String>,
}

#[derive(Debug)]
pub enum ProvisionOutcome {
    Planned(Vec<PlannedStep>),
    Completed(RunReport),
}

pub fn execute(
    options: &ProvisionOptions,
    env: &Environment,
    observer: &mut dyn RunObserver,
) -> Result<ProvisionOutcome, AppError> {
    let config = load_config(options.config.as_deref(), env)?;
    let target =
        if options.dry_run { planning_target(&config) } else { resolve_target(&config)? };
    let pipeline = Pipeline::new(catalog::workstation_steps(target)?)?;

    let run = RunContext::prepare(
        config,
        target,
        options.dist_root.as_deref(),
        options.home.as_deref(),
        options.neovim_only,
        env,
    )?;
    let selector =
        options.only.as_deref().or_else(|| run.ctx.neovim_only().then_some(catalog::NEOVIM));

    if options.dry_run {
        let planned = pipeline
            .select(selector)?
            .into_iter()
            .map(|step| PlannedStep {
                name: step.name.to_string(),
                actions: step.actions.iter().map(ToString::to_string).collect(),
            })
            .collect();
        return Ok(ProvisionOutcome::Planned(planned));
    }

    // Already root: prefixing installs with sudo would be redundant.
    let escalation =
        if running_elevated() { Vec::new() } else { run.config.packages.escalation.clone() };
    let packages = CommandPackageManager::new(target, escalation);
    let releases = HttpReleaseFeed::new(&run.config.http, env.github_token.clone())?;
    let archives = CommandArchiveExtractor::new();
    let repositories = Git2Cloner::new();
    let ownership = ChownCommand::new();
    let ports = Ports {
        packages: &packages,
        releases: &releases,
        archives: &archives,
        repositories: &repositories,
        ownership: &ownership,
    };

    tracing::info!(
        manager = %target,
        selector = ?selector,
        home = %run.ctx.home().display(),
        "provisioning"
    );
    let report = pipeline.run(&run.ctx, ports, selector, observer)?.into_result()?;
    Ok(ProvisionOutcome::Completed(report))
}
