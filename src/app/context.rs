//! Resolution of the execution context from options, config and environment.

use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::adapters::{bundled_dotfiles, user_account};
use crate::app::environment::Environment;
use crate::domain::{AppError, ExecutionContext, Ownership, PackageTarget, ProvisionConfig};

const OS_RELEASE_PATHS: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];

/// Where dotfiles are read from for this run.
#[derive(Debug)]
pub enum DistRoot {
    /// A directory supplied by the caller.
    Supplied(PathBuf),
    /// The embedded bundle written into a directory removed when dropped.
    Bundled(TempDir),
}

impl DistRoot {
    /// Resolve `--dist-root`, then `RIGUP_DIST_ROOT`, then the embedded bundle.
    pub fn resolve(explicit: Option<&Path>, env: &Environment) -> Result<Self, AppError> {
        let supplied = explicit.map(Path::to_path_buf).or_else(|| env.dist_root.clone());
        if let Some(path) = supplied {
            if !path.is_dir() {
                return Err(AppError::config_error(format!(
                    "Distribution root is not a directory: {}",
                    path.display()
                )));
            }
            return Ok(DistRoot::Supplied(path));
        }

        let dir = tempfile::Builder::new().prefix("rigup-dist-").tempdir()?;
        bundled_dotfiles::materialize(dir.path())?;
        tracing::debug!(path = %dir.path().display(), "using bundled dotfiles");
        Ok(DistRoot::Bundled(dir))
    }

    pub fn path(&self) -> &Path {
        match self {
            DistRoot::Supplied(path) => path,
            DistRoot::Bundled(dir) => dir.path(),
        }
    }
}

/// Pick the package manager target: configured, else detected from os-release.
pub fn resolve_target(config: &ProvisionConfig) -> Result<PackageTarget, AppError> {
    resolve_target_from(config, &OS_RELEASE_PATHS)
}

/// Target for listing and planning, which never touch the package manager:
/// an undetectable host falls back to apt.
pub fn planning_target(config: &ProvisionConfig) -> PackageTarget {
    planning_target_from(config, &OS_RELEASE_PATHS)
}

fn resolve_target_from(
    config: &ProvisionConfig,
    os_release_paths: &[&str],
) -> Result<PackageTarget, AppError> {
    if let Some(target) = config.packages.manager.fixed() {
        return Ok(target);
    }

    let content = os_release_paths
        .iter()
        .find_map(|path| std::fs::read_to_string(path).ok())
        .ok_or_else(|| AppError::UnsupportedDistribution("unknown".to_string()))?;
    PackageTarget::from_os_release(&content)
}

fn planning_target_from(config: &ProvisionConfig, os_release_paths: &[&str]) -> PackageTarget {
    resolve_target_from(config, os_release_paths).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "package manager not detected, showing apt steps");
        PackageTarget::Apt
    })
}

/// Target home: `--home`, else the passwd home of the user who invoked sudo,
/// else `HOME`.
///
/// Under sudo without `SUDO_USER`, `HOME` is only trusted when `SUDO_UID` owns
/// it, since sudo commonly resets `HOME` to root's.
pub fn resolve_home(explicit: Option<&Path>, env: &Environment) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(user) = env.sudo_user.as_deref() {
        return user_account::passwd_home(user).map_err(|details| {
            AppError::config_error(format!(
                "Cannot resolve the home directory of '{}' ({}); pass --home",
                user, details
            ))
        });
    }

    let home = env.home.clone().ok_or(AppError::HomeNotFound)?;
    if let Some(uid) = env.sudo_uid.as_deref().and_then(|uid| uid.trim().parse::<u32>().ok()) {
        let owner = std::fs::metadata(&home).map(|metadata| metadata.uid()).ok();
        if owner != Some(uid) {
            return Err(AppError::config_error(format!(
                "HOME {} is not owned by the invoking user (uid {}); pass --home",
                home.display(),
                uid
            )));
        }
    }
    Ok(home)
}

/// Everything a run needs that outlives option parsing.
#[derive(Debug)]
pub struct RunContext {
    pub ctx: ExecutionContext,
    pub config: ProvisionConfig,
    // Keeps a bundled distribution root alive for the run.
    _dist_root: DistRoot,
}

impl RunContext {
    pub fn prepare(
        config: ProvisionConfig,
        target: PackageTarget,
        dist_root: Option<&Path>,
        home: Option<&Path>,
        neovim_only: bool,
        env: &Environment,
    ) -> Result<Self, AppError> {
        let home = resolve_home(home, env)?;
        let dist_root = DistRoot::resolve(dist_root, env)?;
        let owner = Ownership::from_sudo_vars(env.sudo_uid.as_deref(), env.sudo_gid.as_deref());

        let ctx = ExecutionContext::new(dist_root.path().to_path_buf(), home, target)
            .with_owner(owner)
            .with_prereleases(config.releases.include_prereleases)
            .with_neovim_only(neovim_only);

        tracing::debug!(?ctx, "execution context ready");
        Ok(Self { ctx, config, _dist_root: dist_root })
    }
}
