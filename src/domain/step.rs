//! Step domain model.

use std::fmt;

use crate::domain::action::Action;
use crate::domain::{ActionError, AppError};

/// A validated step identifier.
///
/// Guarantees:
/// - Non-empty
/// - Contains only lowercase ASCII letters, digits, `-`, or `_`
/// - Starts with a letter
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepName(String);

impl StepName {
    /// Validate and create a new instance.
    pub fn new(name: &str) -> Result<Self, AppError> {
        let starts_with_letter = name.chars().next().is_some_and(|c| c.is_ascii_lowercase());
        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

        if starts_with_letter && valid_chars {
            Ok(Self(name.to_string()))
        } else {
            Err(AppError::InvalidStepName(name.to_string()))
        }
    }

    /// Return the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for StepName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for StepName {
    fn as_ref(&self) -> &str {
        self
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered unit of provisioning work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Unique name within a pipeline.
    pub name: StepName,
    /// One-line description shown by `--list`.
    pub summary: String,
    /// Actions executed in order.
    pub actions: Vec<Action>,
}

impl Step {
    pub fn new(name: StepName, summary: impl Into<String>, actions: Vec<Action>) -> Self {
        Self { name, summary: summary.into(), actions }
    }

    /// Whether any action downloads into the step's scratch directory.
    pub fn needs_scratch(&self) -> bool {
        self.actions.iter().any(|action| matches!(action, Action::FetchRelease { .. }))
    }
}

/// Lifecycle of a step within a run.
///
/// `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Succeeded,
    Failed(ActionError),
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Succeeded | StepStatus::Failed(_))
    }

    /// Move to `Running`. Terminal states are left untouched.
    pub fn start(self) -> Self {
        match self {
            StepStatus::Pending => StepStatus::Running,
            other => other,
        }
    }

    /// Record the step's result. Only a running step can finish.
    pub fn finish(self, result: Result<(), ActionError>) -> Self {
        match (self, result) {
            (StepStatus::Running, Ok(())) => StepStatus::Succeeded,
            (StepStatus::Running, Err(err)) => StepStatus::Failed(err),
            (other, _) => other,
        }
    }
}

/// Result of a single executed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action changed the system.
    Applied,
    /// The desired state was already present.
    Skipped(String),
}

/// Outcome of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub name: StepName,
    pub status: StepStatus,
    pub applied: usize,
    pub skipped: usize,
}

impl StepReport {
    pub fn failure(&self) -> Option<&ActionError> {
        match &self.status {
            StepStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Overall result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    AllSucceeded,
    FailedAt { step: StepName, reason: ActionError },
}

/// Reports of every executed step, in execution order, plus the overall result.
///
/// Steps that were never scheduled have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
    pub result: RunResult,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.result == RunResult::AllSucceeded
    }

    pub fn executed(&self) -> Vec<&str> {
        self.steps.iter().map(|report| report.name.as_str()).collect()
    }

    /// Convert into an error when the run failed.
    pub fn into_result(self) -> Result<Self, AppError> {
        match &self.result {
            RunResult::AllSucceeded => Ok(self),
            RunResult::FailedAt { step, reason } => {
                Err(AppError::StepFailed { step: step.to_string(), source: reason.clone() })
            }
        }
    }
}
