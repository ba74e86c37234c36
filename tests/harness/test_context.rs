//! Shared testing harness for `rigup` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const APT_CONFIG: &str = "[packages]\nmanager = \"apt\"\n";

/// Testing harness providing an isolated home and config directory.
///
/// The package manager is pinned to apt so runs do not depend on the host
/// distribution.
pub(crate) struct TestContext {
    root: TempDir,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::create_dir_all(root.path().join("home")).expect("Failed to create test home");

        let config_dir = root.path().join("xdg/rigup");
        fs::create_dir_all(&config_dir).expect("Failed to create config directory");
        fs::write(config_dir.join("config.toml"), APT_CONFIG).expect("Failed to write config");

        Self { root }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub(crate) fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Scratch location outside the emulated home.
    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    /// Write a file relative to the test root, creating parents.
    pub(crate) fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Build a command for invoking the compiled `rigup` binary.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("rigup").expect("Failed to locate rigup binary");
        cmd.current_dir(self.root.path())
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.root.path().join("xdg"))
            .env_remove("RIGUP_DIST_ROOT")
            .env_remove("RIGUP_LOG")
            .env_remove("SUDO_USER")
            .env_remove("SUDO_UID")
            .env_remove("SUDO_GID")
            .env_remove("GITHUB_TOKEN");
        cmd
    }
}
