//! GitHub release feed client implementation using reqwest.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use url::Url;

use crate::domain::{ActionError, AppError, HttpConfig, Release, ReleaseAsset, RepoSlug};
use crate::ports::ReleaseFeed;

const GITHUB_JSON: &str = "application/vnd.github+json";
const RELEASES_PER_PAGE: &str = "30";

/// HTTP transport for a GitHub-compatible releases API.
///
/// One request per call, no retries. Every request is bounded by the
/// configured timeouts.
#[derive(Clone)]
pub struct HttpReleaseFeed {
    api_url: Url,
    user_agent: String,
    token: Option<String>,
    client: Client,
}

impl std::fmt::Debug for HttpReleaseFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpReleaseFeed")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpReleaseFeed {
    /// Create a new client from configuration and an optional API token.
    pub fn new(config: &HttpConfig, token: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_url: config.api_url.clone(),
            user_agent: config.user_agent.clone(),
            token: token.filter(|value| !value.trim().is_empty()),
            client,
        })
    }

    fn releases_url(&self, repo: &RepoSlug) -> Result<Url, String> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| format!("API URL '{}' cannot be a base", self.api_url))?
            .pop_if_empty()
            .extend(["repos", repo.owner(), repo.repo(), "releases"]);
        url.query_pairs_mut().append_pair("per_page", RELEASES_PER_PAGE);
        Ok(url)
    }

    fn get(&self, url: &str) -> reqwest::blocking::RequestBuilder {
        let request = self.client.get(url).header(USER_AGENT, &self.user_agent);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiRelease {
    tag_name: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
    #[serde(default)]
    assets: Vec<ApiAsset>,
}

#[derive(Debug, Deserialize)]
struct ApiAsset {
    name: String,
    browser_download_url: String,
    #[serde(default)]
    size: u64,
}

impl From<ApiRelease> for Release {
    fn from(value: ApiRelease) -> Self {
        Release {
            tag: value.tag_name,
            draft: value.draft,
            prerelease: value.prerelease,
            assets: value
                .assets
                .into_iter()
                .map(|asset| ReleaseAsset {
                    name: asset.name,
                    download_url: asset.browser_download_url,
                    size: asset.size,
                })
                .collect(),
        }
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;
    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl ReleaseFeed for HttpReleaseFeed {
    fn list_releases(&self, repo: &RepoSlug) -> Result<Vec<Release>, ActionError> {
        let resolution_failed = |details: String| ActionError::ReleaseResolutionFailed {
            repo: repo.to_string(),
            details,
        };

        let url = self.releases_url(repo).map_err(resolution_failed)?;
        tracing::info!(%repo, %url, "listing releases");

        let response = self
            .get(url.as_str())
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .map_err(|e| resolution_failed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| resolution_failed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = extract_error_message(&body).unwrap_or_else(|| "request failed".into());
            return Err(resolution_failed(format!("HTTP {}: {}", status.as_u16(), message)));
        }

        let releases: Vec<ApiRelease> = serde_json::from_str(&body)
            .map_err(|e| resolution_failed(format!("Failed to parse response: {}", e)))?;

        Ok(releases.into_iter().map(Release::from).collect())
    }

    fn download(&self, asset: &ReleaseAsset, dest: &Path) -> Result<u64, ActionError> {
        let download_failed = |details: String| ActionError::DownloadFailed {
            url: asset.download_url.clone(),
            details,
        };

        tracing::info!(asset = %asset.name, dest = %dest.display(), "downloading");

        let mut response = self
            .get(&asset.download_url)
            .send()
            .map_err(|e| download_failed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(download_failed(format!("HTTP {}", status.as_u16())));
        }

        let file = File::create(dest)
            .map_err(|e| download_failed(format!("cannot create {}: {}", dest.display(), e)))?;
        let mut writer = BufWriter::new(file);
        let written = response
            .copy_to(&mut writer)
            .map_err(|e| download_failed(format!("transfer interrupted: {}", e)))?;
        writer.flush().map_err(|e| download_failed(format!("write failed: {}", e)))?;

        if written == 0 {
            return Err(download_failed("empty download".to_string()));
        }

        Ok(written)
    }
}
