use std::path::Path;

use crate::domain::ActionError;

/// Port for the version-control client.
pub trait RepositoryCloner {
    /// Clone `url` into `dest`, which must not exist yet.
    fn clone_repository(&self, url: &str, dest: &Path) -> Result<(), ActionError>;
}
