//! Execution context shared read-only by every step of a run.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::PackageTarget;
use crate::domain::action::PathSpec;

/// Numeric owner applied to files placed by a privileged run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    pub uid: u32,
    pub gid: u32,
}

impl Ownership {
    /// Read the invoking user's identity from `SUDO_UID` / `SUDO_GID` values.
    pub fn from_sudo_vars(uid: Option<&str>, gid: Option<&str>) -> Option<Self> {
        let uid = uid?.trim().parse().ok()?;
        let gid = gid?.trim().parse().ok()?;
        Some(Self { uid, gid })
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uid, self.gid)
    }
}

/// Process-wide state for a run. Constructed once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    dist_root: PathBuf,
    home: PathBuf,
    target: PackageTarget,
    owner: Option<Ownership>,
    include_prereleases: bool,
    neovim_only: bool,
}

impl ExecutionContext {
    pub fn new(dist_root: PathBuf, home: PathBuf, target: PackageTarget) -> Self {
        Self {
            dist_root,
            home,
            target,
            owner: None,
            include_prereleases: false,
            neovim_only: false,
        }
    }

    pub fn with_owner(mut self, owner: Option<Ownership>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_prereleases(mut self, include_prereleases: bool) -> Self {
        self.include_prereleases = include_prereleases;
        self
    }

    pub fn with_neovim_only(mut self, neovim_only: bool) -> Self {
        self.neovim_only = neovim_only;
        self
    }

    pub fn dist_root(&self) -> &Path {
        &self.dist_root
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn target(&self) -> PackageTarget {
        self.target
    }

    pub fn owner(&self) -> Option<Ownership> {
        self.owner
    }

    pub fn include_prereleases(&self) -> bool {
        self.include_prereleases
    }

    pub fn neovim_only(&self) -> bool {
        self.neovim_only
    }

    pub fn resolve(&self, spec: &PathSpec) -> PathBuf {
        match spec {
            PathSpec::Home(rel) => self.home.join(rel),
            PathSpec::Dist(rel) => self.dist_root.join(rel),
            PathSpec::Absolute(path) => path.clone(),
        }
    }

    /// Whether a resolved path lives under the target home directory.
    pub fn is_in_home(&self, path: &Path) -> bool {
        path.starts_with(&self.home)
    }
}
