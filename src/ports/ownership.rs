use std::path::Path;

use crate::domain::{ActionError, Ownership};

/// Port for handing placed files back to the invoking user after a privileged run.
pub trait OwnershipFixer {
    /// Recursively assign `owner` to `path` without following symlinks.
    fn assign(&self, path: &Path, owner: Ownership) -> Result<(), ActionError>;
}
