use std::path::Path;

use crate::adapters::command::run_checked;
use crate::domain::{ActionError, Ownership};
use crate::ports::OwnershipFixer;

/// Restores ownership with `chown -hR uid:gid`.
#[derive(Debug, Clone, Default)]
pub struct ChownCommand;

impl ChownCommand {
    pub fn new() -> Self {
        Self
    }
}

impl OwnershipFixer for ChownCommand {
    fn assign(&self, path: &Path, owner: Ownership) -> Result<(), ActionError> {
        let owner_arg = owner.to_string();
        let path_arg = path.to_string_lossy();

        tracing::debug!(path = %path.display(), %owner, "restoring ownership");
        run_checked("chown", &["-hR", &owner_arg, &path_arg]).map(|_| ()).map_err(|details| {
            ActionError::OwnershipFailed { path: path.display().to_string(), details }
        })
    }
}
