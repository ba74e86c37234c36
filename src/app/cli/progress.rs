use crate::app::pipeline::RunObserver;
use crate::domain::{Action, ActionError, ActionOutcome, Step, StepReport};

/// Prints step and action progress to stdout.
#[derive(Debug, Default)]
pub(super) struct ConsoleObserver;

impl RunObserver for ConsoleObserver {
    fn step_started(&mut self, step: &Step) {
        println!("==> {} ({})", step.name, step.summary);
    }

    fn action_finished(&mut self, action: &Action, result: &Result<ActionOutcome, ActionError>) {
        match result {
            Ok(ActionOutcome::Applied) => println!("  ✅ {}", action),
            Ok(ActionOutcome::Skipped(reason)) => println!("  ⏭️  {} ({})", action, reason),
            Err(_) => println!("  ❌ {}", action),
        }
    }

    fn step_finished(&mut self, report: &StepReport) {
        if report.failure().is_none() {
            println!(
                "✅ {}: {} applied, {} already in place",
                report.name, report.applied, report.skipped
            );
        }
    }
}
