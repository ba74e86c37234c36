//! Configuration file discovery and loading.

use std::path::{Path, PathBuf};

use crate::app::environment::Environment;
use crate::domain::{AppError, ProvisionConfig};

const CONFIG_DIR: &str = "rigup";
const CONFIG_FILE: &str = "config.toml";

/// Candidate config locations, highest precedence first.
pub fn config_candidates(explicit: Option<&Path>, env: &Environment) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut candidates = Vec::new();
    if let Some(xdg) = &env.xdg_config_home {
        candidates.push(xdg.join(CONFIG_DIR).join(CONFIG_FILE));
    }
    if let Some(home) = &env.home {
        candidates.push(home.join(".config").join(CONFIG_DIR).join(CONFIG_FILE));
    }
    candidates
}

/// Load the first existing config file, or defaults when there is none.
///
/// An explicitly requested file must exist.
pub fn load_config(
    explicit: Option<&Path>,
    env: &Environment,
) -> Result<ProvisionConfig, AppError> {
    if let Some(path) = explicit
        && !path.is_file()
    {
        return Err(AppError::config_error(format!("Config file not found: {}", path.display())));
    }

    let Some(path) = config_candidates(explicit, env).into_iter().find(|path| path.is_file()) else {
        tracing::debug!("no config file found, using defaults");
        return Ok(ProvisionConfig::default());
    };

    tracing::debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(&path)?;
    ProvisionConfig::parse(&content).map_err(|err| match err {
        AppError::TomlParse(parse) => {
            AppError::InvalidConfig(format!("{}: {}", path.display(), parse.message()))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManagerSelection, PackageTarget};
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn env_with(temp: &TempDir) -> Environment {
        Environment {
            home: Some(temp.path().join("home")),
            xdg_config_home: Some(temp.path().join("xdg")),
            ..Default::default()
        }
    }

    #[test]
    fn xdg_location_precedes_home_location() {
        let temp = TempDir::new().unwrap();
        let candidates = config_candidates(None, &env_with(&temp));
        assert_eq!(
            candidates,
            vec![
                temp.path().join("xdg/rigup/config.toml"),
                temp.path().join("home/.config/rigup/config.toml"),
            ]
        );
    }

    #[test]
    fn absent_files_yield_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_config(None, &env_with(&temp)).unwrap(), ProvisionConfig::default());
    }

    #[test]
    fn home_config_is_used_without_xdg_file() {
        let temp = TempDir::new().unwrap();
        temp.child("home/.config/rigup/config.toml")
            .write_str("[packages]\nmanager = \"dnf\"\n")
            .unwrap();

        let config = load_config(None, &env_with(&temp)).unwrap();
        assert_eq!(config.packages.manager.fixed(), Some(PackageTarget::Dnf));
    }

    #[test]
    fn explicit_file_wins() {
        let temp = TempDir::new().unwrap();
        temp.child("xdg/rigup/config.toml").write_str("[packages]\nmanager = \"dnf\"\n").unwrap();
        temp.child("custom.toml").write_str("[packages]\nmanager = \"apt\"\n").unwrap();

        let config =
            load_config(Some(&temp.path().join("custom.toml")), &env_with(&temp)).unwrap();
        assert_eq!(config.packages.manager, ManagerSelection::Apt);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config(Some(&temp.path().join("nope.toml")), &env_with(&temp)).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let temp = TempDir::new().unwrap();
        temp.child("xdg/rigup/config.toml").write_str("[http]\nretries = 3\n").unwrap();

        let err = load_config(None, &env_with(&temp)).unwrap_err();
        match err {
            AppError::InvalidConfig(message) => assert!(message.contains("config.toml")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
