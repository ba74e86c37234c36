use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::domain::{ActionError, PackageTarget};
use crate::ports::PackageManager;

/// Records installs; packages can be pre-installed or made to fail.
pub struct FakePackageManager {
    target: PackageTarget,
    installed: Mutex<BTreeSet<String>>,
    failing: Mutex<BTreeSet<String>>,
    install_calls: Mutex<Vec<String>>,
}

impl FakePackageManager {
    pub fn new(target: PackageTarget) -> Self {
        Self {
            target,
            installed: Mutex::new(BTreeSet::new()),
            failing: Mutex::new(BTreeSet::new()),
            install_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn mark_installed(&self, name: &str) {
        self.installed.lock().unwrap().insert(name.to_string());
    }

    pub fn fail_on(&self, name: &str) {
        self.failing.lock().unwrap().insert(name.to_string());
    }

    pub fn installed_calls(&self) -> Vec<String> {
        self.install_calls.lock().unwrap().clone()
    }
}

impl PackageManager for FakePackageManager {
    fn target(&self) -> PackageTarget {
        self.target
    }

    fn is_installed(&self, name: &str) -> Result<bool, ActionError> {
        Ok(self.installed.lock().unwrap().contains(name))
    }

    fn install(&self, name: &str) -> Result<(), ActionError> {
        self.install_calls.lock().unwrap().push(name.to_string());
        if self.failing.lock().unwrap().contains(name) {
            return Err(ActionError::PackageInstallFailed {
                package: name.to_string(),
                details: "simulated failure".to_string(),
            });
        }
        self.installed.lock().unwrap().insert(name.to_string());
        Ok(())
    }
}
