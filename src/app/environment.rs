//! Process environment captured once at startup.

use std::fmt;
use std::path::PathBuf;

/// Environment variables rigup reads. Captured up front so commands can be
/// exercised with an injected environment.
#[derive(Clone, Default)]
pub struct Environment {
    pub home: Option<PathBuf>,
    pub dist_root: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub sudo_user: Option<String>,
    pub sudo_uid: Option<String>,
    pub sudo_gid: Option<String>,
    pub github_token: Option<String>,
}

impl Environment {
    pub fn from_process() -> Self {
        Self {
            home: path_var("HOME"),
            dist_root: path_var("RIGUP_DIST_ROOT"),
            xdg_config_home: path_var("XDG_CONFIG_HOME"),
            sudo_user: text_var("SUDO_USER"),
            sudo_uid: text_var("SUDO_UID"),
            sudo_gid: text_var("SUDO_GID"),
            github_token: text_var("GITHUB_TOKEN"),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("home", &self.home)
            .field("dist_root", &self.dist_root)
            .field("xdg_config_home", &self.xdg_config_home)
            .field("sudo_user", &self.sudo_user)
            .field("sudo_uid", &self.sudo_uid)
            .field("sudo_gid", &self.sudo_gid)
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn text_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn path_var(key: &str) -> Option<PathBuf> {
    text_var(key).map(PathBuf::from)
}
