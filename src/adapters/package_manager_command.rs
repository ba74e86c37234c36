//! Package manager adapter driving `apt-get` or `dnf` as subprocesses.

use std::cell::Cell;

use crate::adapters::command::{run, run_checked};
use crate::domain::{ActionError, PackageTarget};
use crate::ports::PackageManager;

/// Subprocess-backed package manager.
///
/// Installs are prefixed with the escalation command (e.g. `sudo`) unless the
/// process already runs elevated. The apt index is refreshed once, before the
/// first install of the run.
#[derive(Debug)]
pub struct CommandPackageManager {
    target: PackageTarget,
    escalation: Vec<String>,
    index_refreshed: Cell<bool>,
}

impl CommandPackageManager {
    pub fn new(target: PackageTarget, escalation: Vec<String>) -> Self {
        Self { target, escalation, index_refreshed: Cell::new(false) }
    }

    fn install_argv(&self, package: &str) -> Vec<String> {
        let tail: Vec<&str> = match self.target {
            // `env` keeps the variable across sudo's environment reset.
            PackageTarget::Apt => {
                vec!["env", "DEBIAN_FRONTEND=noninteractive", "apt-get", "install", "-y", package]
            }
            PackageTarget::Dnf => vec!["dnf", "install", "-y", package],
        };
        self.escalated(&tail)
    }

    fn refresh_argv(&self) -> Option<Vec<String>> {
        match self.target {
            PackageTarget::Apt => Some(self.escalated(&["apt-get", "update"])),
            PackageTarget::Dnf => None,
        }
    }

    fn escalated(&self, tail: &[&str]) -> Vec<String> {
        self.escalation.iter().cloned().chain(tail.iter().map(|part| part.to_string())).collect()
    }

    fn run_argv(&self, argv: &[String], package: &str) -> Result<(), ActionError> {
        let Some((program, args)) = argv.split_first() else {
            return Err(ActionError::PackageInstallFailed {
                package: package.to_string(),
                details: "empty install command".to_string(),
            });
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        run_checked(program, &args).map(|_| ()).map_err(|details| {
            ActionError::PackageInstallFailed { package: package.to_string(), details }
        })
    }
}

impl PackageManager for CommandPackageManager {
    fn target(&self) -> PackageTarget {
        self.target
    }

    fn is_installed(&self, package: &str) -> Result<bool, ActionError> {
        let query_failed = |details: String| ActionError::PackageInstallFailed {
            package: package.to_string(),
            details,
        };

        match self.target {
            PackageTarget::Apt => {
                // dpkg-query exits non-zero for packages it has never seen.
                let output =
                    run("dpkg-query", &["-W", "-f=${Status}", package]).map_err(query_failed)?;
                Ok(output.status.success()
                    && String::from_utf8_lossy(&output.stdout).contains("install ok installed"))
            }
            PackageTarget::Dnf => {
                let output = run("rpm", &["-q", package]).map_err(query_failed)?;
                Ok(output.status.success())
            }
        }
    }

    fn install(&self, package: &str) -> Result<(), ActionError> {
        if !self.index_refreshed.get() {
            if let Some(argv) = self.refresh_argv() {
                self.run_argv(&argv, package)?;
            }
            self.index_refreshed.set(true);
        }

        tracing::info!(package, manager = %self.target, "installing package");
        self.run_argv(&self.install_argv(package), package)
    }
}

/// Whether the process already runs with root privileges, judged by the
/// effective uid alone.
pub fn running_elevated() -> bool {
    run_checked("id", &["-u"])
        .map(|output| is_root_uid(&String::from_utf8_lossy(&output.stdout)))
        .unwrap_or(false)
}

fn is_root_uid(id_output: &str) -> bool {
    id_output.trim() == "0"
}
