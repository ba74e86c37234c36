//! Release feed port definition.

use std::path::Path;

use crate::domain::{ActionError, Release, ReleaseAsset, RepoSlug};

/// Port for listing and downloading release assets.
pub trait ReleaseFeed {
    /// List releases of `repo`, most recent first.
    fn list_releases(&self, repo: &RepoSlug) -> Result<Vec<Release>, ActionError>;

    /// Download `asset` to `dest`, returning the number of bytes written.
    ///
    /// An empty body is a failure.
    fn download(&self, asset: &ReleaseAsset, dest: &Path) -> Result<u64, ActionError>;
}
