//! Ordered, fail-fast execution of provisioning steps.

use std::collections::BTreeSet;

use crate::app::actions::ActionRunner;
use crate::domain::{
    Action, ActionError, ActionOutcome, AppError, ExecutionContext, RunReport, RunResult, Step,
    StepReport, StepStatus,
};
use crate::ports::Ports;

/// Progress callbacks for a run. Every method defaults to a no-op.
pub trait RunObserver {
    fn step_started(&mut self, _step: &Step) {}

    fn action_finished(
        &mut self,
        _action: &Action,
        _result: &Result<ActionOutcome, ActionError>,
    ) {
    }

    fn step_finished(&mut self, _report: &StepReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// A validated, ordered list of steps.
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Result<Self, AppError> {
        let mut seen = BTreeSet::new();
        for step in &steps {
            if !seen.insert(step.name.as_str()) {
                return Err(AppError::DuplicateStep(step.name.to_string()));
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps scheduled for `selector`: the named step alone, or all of them.
    pub fn select(&self, selector: Option<&str>) -> Result<Vec<&Step>, AppError> {
        let Some(name) = selector else {
            return Ok(self.steps.iter().collect());
        };

        match self.steps.iter().find(|step| step.name.as_str() == name) {
            Some(step) => Ok(vec![step]),
            None => Err(AppError::UnknownStep {
                name: name.to_string(),
                available: self
                    .steps
                    .iter()
                    .map(|step| step.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Run the selected steps in order, stopping at the first failed action.
    ///
    /// A failed step is reported in the returned [`RunReport`]; `Err` is only
    /// returned when the selector is unknown.
    pub fn run(
        &self,
        ctx: &ExecutionContext,
        ports: Ports<'_>,
        selector: Option<&str>,
        observer: &mut dyn RunObserver,
    ) -> Result<RunReport, AppError> {
        let scheduled = self.select(selector)?;
        let mut reports = Vec::with_capacity(scheduled.len());

        for step in scheduled {
            let report = run_step(step, ctx, ports, observer);
            let failure = report.failure().cloned();
            reports.push(report);

            if let Some(reason) = failure {
                tracing::error!(step = %step.name, error = %reason, "halting pipeline");
                return Ok(RunReport {
                    steps: reports,
                    result: RunResult::FailedAt { step: step.name.clone(), reason },
                });
            }
        }

        Ok(RunReport { steps: reports, result: RunResult::AllSucceeded })
    }
}

fn run_step(
    step: &Step,
    ctx: &ExecutionContext,
    ports: Ports<'_>,
    observer: &mut dyn RunObserver,
) -> StepReport {
    let span = tracing::info_span!("step", name = %step.name);
    let _guard = span.enter();

    observer.step_started(step);
    let status = StepStatus::Pending.start();
    let mut applied = 0;
    let mut skipped = 0;

    let result = execute_actions(step, ctx, ports, observer, &mut applied, &mut skipped);
    let status = status.finish(result);

    let report = StepReport { name: step.name.clone(), status, applied, skipped };
    tracing::info!(applied, skipped, succeeded = report.failure().is_none(), "step finished");
    observer.step_finished(&report);
    report
}

fn execute_actions(
    step: &Step,
    ctx: &ExecutionContext,
    ports: Ports<'_>,
    observer: &mut dyn RunObserver,
    applied: &mut usize,
    skipped: &mut usize,
) -> Result<(), ActionError> {
    // Dropped on every return path, removing downloaded archives.
    let scratch = if step.needs_scratch() {
        let dir = tempfile::Builder::new().prefix("rigup-").tempdir().map_err(|err| {
            ActionError::DownloadFailed {
                url: String::new(),
                details: format!("failed to create scratch directory: {}", err),
            }
        })?;
        Some(dir)
    } else {
        None
    };

    let runner = ActionRunner::new(ctx, ports, scratch.as_ref().map(|dir| dir.path()));
    for action in &step.actions {
        tracing::debug!(%action, "running action");
        let result = runner.execute(action);
        observer.action_finished(action, &result);

        match result? {
            ActionOutcome::Applied => *applied += 1,
            ActionOutcome::Skipped(reason) => {
                tracing::info!(%action, %reason, "skipped");
                *skipped += 1;
            }
        }
    }
    Ok(())
}
