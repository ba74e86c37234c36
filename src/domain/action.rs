//! Action domain model.

use std::fmt;
use std::path::PathBuf;

use crate::domain::release::{AssetPattern, RepoSlug};

/// Location an action reads from or writes to.
///
/// Relative variants are resolved against the `ExecutionContext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// Relative to the target home directory.
    Home(PathBuf),
    /// Relative to the distribution root holding bundled dotfiles.
    Dist(PathBuf),
    /// Used as given.
    Absolute(PathBuf),
}

impl PathSpec {
    pub fn home(rel: impl Into<PathBuf>) -> Self {
        PathSpec::Home(rel.into())
    }

    pub fn dist(rel: impl Into<PathBuf>) -> Self {
        PathSpec::Dist(rel.into())
    }

    pub fn absolute(path: impl Into<PathBuf>) -> Self {
        PathSpec::Absolute(path.into())
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSpec::Home(rel) => write!(f, "~/{}", rel.display()),
            PathSpec::Dist(rel) => write!(f, "<dist>/{}", rel.display()),
            PathSpec::Absolute(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What a copy does when its source is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSource {
    /// Fail the step.
    #[default]
    Fail,
    /// Log a warning and skip the copy.
    Warn,
}

/// A single side-effecting provisioning operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Install a package through the platform package manager.
    InstallPackage { name: String },
    /// Recursively place a file or directory, overwriting the destination.
    CopyConfig { source: PathSpec, dest: PathSpec, missing: MissingSource },
    /// Download the first asset matching `pattern` into the step scratch
    /// directory as `save_as`.
    FetchRelease { repo: RepoSlug, pattern: AssetPattern, save_as: String },
    /// Unpack a fetched archive, replacing `dest`.
    ExtractArchive { archive: String, dest: PathSpec, strip_components: usize },
    /// Create or replace a symbolic link at `link` pointing to `target`.
    LinkBinary { target: PathSpec, link: PathSpec },
    /// Clone a repository unless `dest` already holds one.
    CloneRepository { url: String, dest: PathSpec },
}

impl Action {
    pub fn install(name: impl Into<String>) -> Self {
        Action::InstallPackage { name: name.into() }
    }

    pub fn copy(source: PathSpec, dest: PathSpec) -> Self {
        Action::CopyConfig { source, dest, missing: MissingSource::Fail }
    }

    pub fn copy_if_present(source: PathSpec, dest: PathSpec) -> Self {
        Action::CopyConfig { source, dest, missing: MissingSource::Warn }
    }

    pub fn fetch(repo: RepoSlug, pattern: AssetPattern, save_as: impl Into<String>) -> Self {
        Action::FetchRelease { repo, pattern, save_as: save_as.into() }
    }

    pub fn extract(archive: impl Into<String>, dest: PathSpec, strip_components: usize) -> Self {
        Action::ExtractArchive { archive: archive.into(), dest, strip_components }
    }

    pub fn link(target: PathSpec, link: PathSpec) -> Self {
        Action::LinkBinary { target, link }
    }

    pub fn clone_repo(url: impl Into<String>, dest: PathSpec) -> Self {
        Action::CloneRepository { url: url.into(), dest }
    }

    /// Short label used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::InstallPackage { .. } => "install",
            Action::CopyConfig { .. } => "copy",
            Action::FetchRelease { .. } => "fetch",
            Action::ExtractArchive { .. } => "extract",
            Action::LinkBinary { .. } => "link",
            Action::CloneRepository { .. } => "clone",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::InstallPackage { name } => write!(f, "install {}", name),
            Action::CopyConfig { source, dest, missing } => {
                write!(f, "copy {} -> {}", source, dest)?;
                if *missing == MissingSource::Warn {
                    write!(f, " (if present)")?;
                }
                Ok(())
            }
            Action::FetchRelease { repo, pattern, save_as } => {
                write!(f, "fetch {} [{}] as {}", repo, pattern, save_as)
            }
            Action::ExtractArchive { archive, dest, strip_components } => {
                write!(f, "extract {} -> {}", archive, dest)?;
                if *strip_components > 0 {
                    write!(f, " (strip {})", strip_components)?;
                }
                Ok(())
            }
            Action::LinkBinary { target, link } => write!(f, "link {} -> {}", link, target),
            Action::CloneRepository { url, dest } => write!(f, "clone {} -> {}", url, dest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_describes_paths() {
        let action = Action::copy(PathSpec::dist("vimrc"), PathSpec::home(".vimrc"));
        assert_eq!(action.to_string(), "copy <dist>/vimrc -> ~/.vimrc");
    }

    #[test]
    fn optional_copy_is_marked() {
        let action = Action::copy_if_present(
            PathSpec::absolute("/usr/share/powerline"),
            PathSpec::home(".config/powerline"),
        );
        assert!(action.to_string().ends_with("(if present)"));
        assert_eq!(action.kind(), "copy");
    }

    #[test]
    fn extract_display_mentions_strip() {
        let action = Action::extract("nvim.tar.gz", PathSpec::home(".local/opt/nvim"), 1);
        assert_eq!(action.to_string(), "extract nvim.tar.gz -> ~/.local/opt/nvim (strip 1)");
    }
}
