//! Provisioning configuration loaded from `config.toml`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, PackageTarget};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisionConfig {
    /// Release feed HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Package manager settings.
    #[serde(default)]
    pub packages: PackagesConfig,
    /// Release selection settings.
    #[serde(default)]
    pub releases: ReleasesConfig,
}

impl ProvisionConfig {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: ProvisionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.http.validate()?;
        self.packages.validate()?;
        Ok(())
    }
}

/// Release feed HTTP configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Base URL of the GitHub-compatible REST API.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.connect_timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(AppError::InvalidConfig("user_agent must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.github.com").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("rigup/{}", env!("CARGO_PKG_VERSION"))
}

/// Which package manager to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerSelection {
    /// Detect from `/etc/os-release`.
    #[default]
    Auto,
    Apt,
    Dnf,
}

impl ManagerSelection {
    /// The fixed target, if one was chosen explicitly.
    pub fn fixed(&self) -> Option<PackageTarget> {
        match self {
            ManagerSelection::Auto => None,
            ManagerSelection::Apt => Some(PackageTarget::Apt),
            ManagerSelection::Dnf => Some(PackageTarget::Dnf),
        }
    }
}

/// Package manager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    #[serde(default)]
    pub manager: ManagerSelection,
    /// Command prefix used to elevate installs when not already root.
    #[serde(default = "default_escalation")]
    pub escalation: Vec<String>,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self { manager: ManagerSelection::default(), escalation: default_escalation() }
    }
}

impl PackagesConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.escalation.iter().any(|part| part.trim().is_empty()) {
            return Err(AppError::InvalidConfig(
                "escalation must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_escalation() -> Vec<String> {
    vec!["sudo".to_string()]
}

/// Release selection configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleasesConfig {
    /// Allow prereleases (e.g. nightly builds) to be selected.
    #[serde(default)]
    pub include_prereleases: bool,
}
