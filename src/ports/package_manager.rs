use crate::domain::{ActionError, PackageTarget};

/// Port for the platform package manager.
pub trait PackageManager {
    /// The package manager family this port drives.
    fn target(&self) -> PackageTarget;

    /// Whether `package` is already installed.
    fn is_installed(&self, package: &str) -> Result<bool, ActionError>;

    /// Install `package`. A single attempt; failures are not retried.
    fn install(&self, package: &str) -> Result<(), ActionError>;
}
