//! Release feed domain model and asset selection.

use std::fmt;

use crate::domain::AppError;

/// A validated `owner/repo` repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    repo: String,
}

impl RepoSlug {
    pub fn new(slug: &str) -> Result<Self, AppError> {
        let (owner, repo) = slug
            .split_once('/')
            .ok_or_else(|| AppError::config_error(format!("Invalid repository '{}'", slug)))?;

        let valid = |part: &str| {
            !part.is_empty()
                && part != "."
                && part != ".."
                && part.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };

        if !valid(owner) || !valid(repo) {
            return Err(AppError::config_error(format!("Invalid repository '{}'", slug)));
        }

        Ok(Self { owner: owner.to_string(), repo: repo.to_string() })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub download_url: String,
    pub size: u64,
}

/// One entry of a release listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag: String,
    pub draft: bool,
    pub prerelease: bool,
    pub assets: Vec<ReleaseAsset>,
}

/// Filename predicate for release assets.
///
/// An asset matches when its name contains every fragment and ends with the
/// suffix (typically the archive extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPattern {
    fragments: Vec<String>,
    suffix: String,
}

impl AssetPattern {
    pub fn new<I, S>(fragments: I, suffix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { fragments: fragments.into_iter().map(Into::into).collect(), suffix: suffix.into() }
    }

    pub fn matches(&self, asset_name: &str) -> bool {
        asset_name.ends_with(&self.suffix)
            && self.fragments.iter().all(|fragment| asset_name.contains(fragment.as_str()))
    }
}

impl fmt::Display for AssetPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*{}*{}", self.fragments.join("*"), self.suffix)
    }
}

/// Select the first asset matching `pattern` in listing order.
///
/// Listings are most-recent-first, so the first match belongs to the newest
/// eligible release. Drafts are never eligible; prereleases only when
/// `include_prereleases` is set.
pub fn select_asset<'a>(
    releases: &'a [Release],
    pattern: &AssetPattern,
    include_prereleases: bool,
) -> Option<(&'a Release, &'a ReleaseAsset)> {
    releases
        .iter()
        .filter(|release| !release.draft && (include_prereleases || !release.prerelease))
        .flat_map(|release| release.assets.iter().map(move |asset| (release, asset)))
        .find(|(_, asset)| pattern.matches(&asset.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            download_url: format!("https://example.test/{}", name),
            size: 1,
        }
    }

    fn release(tag: &str, prerelease: bool, names: &[&str]) -> Release {
        Release {
            tag: tag.to_string(),
            draft: false,
            prerelease,
            assets: names.iter().map(|name| asset(name)).collect(),
        }
    }

    fn nvim_pattern() -> AssetPattern {
        AssetPattern::new(["linux", "x86_64"], ".tar.gz")
    }

    #[test]
    fn repo_slug_parses_owner_and_repo() {
        let slug = RepoSlug::new("neovim/neovim").unwrap();
        assert_eq!(slug.owner(), "neovim");
        assert_eq!(slug.repo(), "neovim");
        assert_eq!(slug.to_string(), "neovim/neovim");
    }

    #[test]
    fn repo_slug_rejects_malformed_input() {
        assert!(RepoSlug::new("neovim").is_err());
        assert!(RepoSlug::new("/neovim").is_err());
        assert!(RepoSlug::new("neovim/../x").is_err());
        assert!(RepoSlug::new("owner/..").is_err());
    }

    #[test]
    fn pattern_requires_all_fragments_and_suffix() {
        let pattern = nvim_pattern();
        assert!(pattern.matches("nvim-linux-x86_64.tar.gz"));
        assert!(!pattern.matches("nvim-linux-x86_64.tar.gz.sha256sum"));
        assert!(!pattern.matches("nvim-linux-arm64.tar.gz"));
        assert!(!pattern.matches("nvim-macos-x86_64.tar.gz"));
    }

    #[test]
    fn no_match_yields_none() {
        let releases = vec![release("v0.10.0", false, &["nvim-win64.zip", "nvim-macos.tar.gz"])];
        assert_eq!(select_asset(&releases, &nvim_pattern(), false), None);
    }

    #[test]
    fn first_match_in_listing_order_wins() {
        let releases = vec![
            release("v0.10.1", false, &["nvim-linux-x86_64.tar.gz", "nvim-linux-x86_64-v2.tar.gz"]),
            release("v0.10.0", false, &["nvim-linux-x86_64.tar.gz"]),
        ];

        let (chosen_release, chosen_asset) =
            select_asset(&releases, &nvim_pattern(), false).unwrap();
        assert_eq!(chosen_release.tag, "v0.10.1");
        assert_eq!(chosen_asset.name, "nvim-linux-x86_64.tar.gz");

        // Same feed, same answer.
        let again = select_asset(&releases, &nvim_pattern(), false).unwrap();
        assert_eq!(again.1, chosen_asset);
    }

    #[test]
    fn prereleases_are_skipped_unless_enabled() {
        let releases = vec![
            release("nightly", true, &["nvim-linux-x86_64.tar.gz"]),
            release("v0.10.1", false, &["nvim-linux-x86_64.tar.gz"]),
        ];

        assert_eq!(select_asset(&releases, &nvim_pattern(), false).unwrap().0.tag, "v0.10.1");
        assert_eq!(select_asset(&releases, &nvim_pattern(), true).unwrap().0.tag, "nightly");
    }

    #[test]
    fn drafts_are_never_selected() {
        let mut draft = release("v0.11.0", false, &["nvim-linux-x86_64.tar.gz"]);
        draft.draft = true;
        let releases = vec![draft, release("v0.10.1", false, &["nvim-linux-x86_64.tar.gz"])];

        assert_eq!(select_asset(&releases, &nvim_pattern(), true).unwrap().0.tag, "v0.10.1");
    }
}
