//! Execution of individual actions against the context and ports.

use std::path::{Path, PathBuf};

use crate::adapters::filesystem;
use crate::domain::{
    Action, ActionError, ActionOutcome, AssetPattern, ExecutionContext, MissingSource, PathSpec,
    RepoSlug, select_asset,
};
use crate::ports::Ports;

/// Runs the actions of one step. Holds the step's scratch directory, if any.
pub(crate) struct ActionRunner<'a> {
    ctx: &'a ExecutionContext,
    ports: Ports<'a>,
    scratch: Option<&'a Path>,
}

impl<'a> ActionRunner<'a> {
    pub(crate) fn new(
        ctx: &'a ExecutionContext,
        ports: Ports<'a>,
        scratch: Option<&'a Path>,
    ) -> Self {
        Self { ctx, ports, scratch }
    }

    pub(crate) fn execute(&self, action: &Action) -> Result<ActionOutcome, ActionError> {
        match action {
            Action::InstallPackage { name } => self.install(name),
            Action::CopyConfig { source, dest, missing } => self.copy(source, dest, *missing),
            Action::FetchRelease { repo, pattern, save_as } => self.fetch(repo, pattern, save_as),
            Action::ExtractArchive { archive, dest, strip_components } => {
                self.extract(archive, dest, *strip_components)
            }
            Action::LinkBinary { target, link } => self.link(target, link),
            Action::CloneRepository { url, dest } => self.clone_repository(url, dest),
        }
    }

    fn install(&self, name: &str) -> Result<ActionOutcome, ActionError> {
        if self.ports.packages.is_installed(name)? {
            return Ok(ActionOutcome::Skipped(format!(
                "{} already installed ({})",
                name,
                self.ports.packages.target()
            )));
        }
        self.ports.packages.install(name)?;
        Ok(ActionOutcome::Applied)
    }

    fn copy(
        &self,
        source: &PathSpec,
        dest: &PathSpec,
        missing: MissingSource,
    ) -> Result<ActionOutcome, ActionError> {
        let source_path = self.ctx.resolve(source);
        let dest_path = self.ctx.resolve(dest);
        let copy_failed = |details: String| ActionError::ConfigCopyFailed {
            source_path: source_path.display().to_string(),
            dest: dest_path.display().to_string(),
            details,
        };

        if !source_path.exists() {
            return match missing {
                MissingSource::Fail => Err(copy_failed("source does not exist".to_string())),
                MissingSource::Warn => {
                    tracing::warn!(
                        source = %source_path.display(),
                        "configuration source absent, skipping copy"
                    );
                    Ok(ActionOutcome::Skipped(format!("{} not present", source_path.display())))
                }
            };
        }

        let placed = self.placement_root(&dest_path);
        filesystem::copy_replacing(&source_path, &dest_path)
            .map_err(|err| copy_failed(err.to_string()))?;
        self.restore_ownership(&placed)?;
        Ok(ActionOutcome::Applied)
    }

    fn fetch(
        &self,
        repo: &RepoSlug,
        pattern: &AssetPattern,
        save_as: &str,
    ) -> Result<ActionOutcome, ActionError> {
        let releases = self.ports.releases.list_releases(repo)?;
        let (release, asset) = select_asset(&releases, pattern, self.ctx.include_prereleases())
            .ok_or_else(|| ActionError::ReleaseResolutionFailed {
                repo: repo.to_string(),
                details: format!(
                    "no matching asset for '{}' among {} release(s)",
                    pattern,
                    releases.len()
                ),
            })?;

        tracing::info!(%repo, tag = %release.tag, asset = %asset.name, "resolved release asset");

        let dest = self.scratch_file(save_as).map_err(|details| ActionError::DownloadFailed {
            url: asset.download_url.clone(),
            details,
        })?;
        self.ports.releases.download(asset, &dest)?;
        Ok(ActionOutcome::Applied)
    }

    fn extract(
        &self,
        archive: &str,
        dest: &PathSpec,
        strip_components: usize,
    ) -> Result<ActionOutcome, ActionError> {
        let dest_path = self.ctx.resolve(dest);
        let extract_failed = |details: String| ActionError::ExtractFailed {
            archive: archive.to_string(),
            details,
        };

        let archive_path = self.scratch_file(archive).map_err(extract_failed)?;
        if !archive_path.is_file() {
            return Err(extract_failed("archive was not fetched by this step".to_string()));
        }

        let placed = self.placement_root(&dest_path);
        let parent = dest_path
            .parent()
            .ok_or_else(|| extract_failed(format!("{} has no parent", dest_path.display())))?;
        std::fs::create_dir_all(parent).map_err(|err| extract_failed(err.to_string()))?;

        // Staging beside the destination keeps the final move on one filesystem.
        let staging = tempfile::Builder::new()
            .prefix(".rigup-unpack-")
            .tempdir_in(parent)
            .map_err(|err| extract_failed(err.to_string()))?;

        self.ports.archives.unpack(&archive_path, staging.path())?;
        filesystem::place_unpacked(staging.path(), &dest_path, strip_components)
            .map_err(|err| extract_failed(err.to_string()))?;

        self.restore_ownership(&placed)?;
        Ok(ActionOutcome::Applied)
    }

    fn link(&self, target: &PathSpec, link: &PathSpec) -> Result<ActionOutcome, ActionError> {
        let target_path = self.ctx.resolve(target);
        let link_path = self.ctx.resolve(link);
        let placed = self.placement_root(&link_path);

        filesystem::replace_symlink(&target_path, &link_path).map_err(|err| {
            ActionError::LinkFailed {
                link: link_path.display().to_string(),
                details: err.to_string(),
            }
        })?;

        self.restore_ownership(&placed)?;
        Ok(ActionOutcome::Applied)
    }

    fn clone_repository(&self, url: &str, dest: &PathSpec) -> Result<ActionOutcome, ActionError> {
        let dest_path = self.ctx.resolve(dest);
        if dest_path.join(".git").exists() {
            return Ok(ActionOutcome::Skipped(format!("{} already cloned", dest_path.display())));
        }

        let placed = self.placement_root(&dest_path);
        self.ports.repositories.clone_repository(url, &dest_path)?;
        self.restore_ownership(&placed)?;
        Ok(ActionOutcome::Applied)
    }

    fn scratch_file(&self, name: &str) -> Result<PathBuf, String> {
        let scratch = self.scratch.ok_or_else(|| "step has no scratch directory".to_string())?;
        if name.is_empty() || name.contains('/') || name == "." || name == ".." {
            return Err(format!("'{}' is not a plain file name", name));
        }
        Ok(scratch.join(name))
    }

    /// Topmost path under home that placing `path` creates: the highest missing
    /// ancestor below home, or `path` itself when its parent already exists.
    fn placement_root(&self, path: &Path) -> PathBuf {
        let home = self.ctx.home();
        let mut root = path.to_path_buf();
        for ancestor in path.ancestors().skip(1) {
            if ancestor == home
                || !ancestor.starts_with(home)
                || std::fs::symlink_metadata(ancestor).is_ok()
            {
                break;
            }
            root = ancestor.to_path_buf();
        }
        root
    }

    /// Hand a placed path back to the invoking user when running under sudo.
    ///
    /// Only paths inside the target home are touched. `path` is assigned
    /// recursively, so directories created on the way are covered too.
    fn restore_ownership(&self, path: &Path) -> Result<(), ActionError> {
        if let Some(owner) = self.ctx.owner()
            && self.ctx.is_in_home(path)
        {
            self.ports.ownership.assign(path, owner)?;
        }
        Ok(())
    }
}
