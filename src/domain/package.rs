//! Package manager targets and distribution detection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// The package manager families rigup knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageTarget {
    /// Debian, Ubuntu and derivatives.
    Apt,
    /// Fedora, RHEL and derivatives.
    Dnf,
}

impl PackageTarget {
    /// Detect the target from `/etc/os-release` content.
    ///
    /// `ID` wins over `ID_LIKE`.
    pub fn from_os_release(content: &str) -> Result<Self, AppError> {
        let mut id = None;
        let mut id_like = None;

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').trim_matches('\'').to_ascii_lowercase();
            match key.trim() {
                "ID" => id = Some(value),
                "ID_LIKE" => id_like = Some(value),
                _ => {}
            }
        }

        let candidates = id.iter().chain(id_like.iter()).flat_map(|value| value.split_whitespace());
        for candidate in candidates {
            if let Some(target) = Self::from_distribution_id(candidate) {
                return Ok(target);
            }
        }

        Err(AppError::UnsupportedDistribution(id.unwrap_or_else(|| "unknown".to_string())))
    }

    fn from_distribution_id(id: &str) -> Option<Self> {
        match id {
            "debian" | "ubuntu" | "linuxmint" | "pop" | "raspbian" => Some(PackageTarget::Apt),
            "fedora" | "rhel" | "centos" | "rocky" | "almalinux" => Some(PackageTarget::Dnf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageTarget::Apt => "apt",
            PackageTarget::Dnf => "dnf",
        }
    }
}

impl fmt::Display for PackageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
