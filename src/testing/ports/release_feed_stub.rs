use std::path::Path;
use std::sync::Mutex;

use crate::domain::{ActionError, Release, ReleaseAsset, RepoSlug};
use crate::ports::ReleaseFeed;

/// Serves a fixed listing and writes placeholder bytes on download.
#[derive(Default)]
pub struct FakeReleaseFeed {
    releases: Mutex<Vec<Release>>,
    queried: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
}

impl FakeReleaseFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_releases(&self, releases: Vec<Release>) {
        *self.releases.lock().unwrap() = releases;
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

impl ReleaseFeed for FakeReleaseFeed {
    fn list_releases(&self, repo: &RepoSlug) -> Result<Vec<Release>, ActionError> {
        self.queried.lock().unwrap().push(repo.to_string());
        Ok(self.releases.lock().unwrap().clone())
    }

    fn download(&self, asset: &ReleaseAsset, dest: &Path) -> Result<u64, ActionError> {
        self.downloads.lock().unwrap().push(asset.download_url.clone());
        let body = format!("archive:{}", asset.name);
        std::fs::write(dest, &body).map_err(|err| ActionError::DownloadFailed {
            url: asset.download_url.clone(),
            details: err.to_string(),
        })?;
        Ok(body.len() as u64)
    }
}

/// A published release whose assets point at `https://dl.test/<tag>/<name>`.
pub fn release_with_assets(tag: &str, names: &[&str]) -> Release {
    Release {
        tag: tag.to_string(),
        draft: false,
        prerelease: false,
        assets: names
            .iter()
            .map(|name| ReleaseAsset {
                name: name.to_string(),
                download_url: format!("https://dl.test/{}/{}", tag, name),
                size: 1,
            })
            .collect(),
    }
}
