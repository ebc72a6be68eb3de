//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use c4view::{C4ViewError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for C4ViewError {
    fn from(err: ConfigError) -> Self {
        C4ViewError::Config(err.to_string())
    }
}

/// Project-local configuration, relative to the working directory.
const LOCAL_CONFIG: &str = "c4view/config.toml";

/// File name inside the platform configuration directory.
const CONFIG_FILE: &str = "config.toml";

/// Find and load configuration.
///
/// An explicit path always wins. Otherwise the first existing file of
/// [`candidate_paths`] is loaded, and the defaults are used when there is none.
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, C4ViewError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let candidates = candidate_paths();
    match find_config(&candidates) {
        Some(path) => {
            info!(path = path.display().to_string(); "Loading configuration");
            load_config_file(path)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Search order: the project-local file, then the platform config directory.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("com", "c4view", "c4view") {
        Some(dirs) => paths.push(dirs.config_dir().join(CONFIG_FILE)),
        None => debug!("Could not determine platform-specific config directory"),
    }
    paths
}

fn find_config(candidates: &[PathBuf]) -> Option<&Path> {
    candidates.iter().map(PathBuf::as_path).find(|path| {
        let exists = path.exists();
        if !exists {
            debug!(path = path.display().to_string(); "Configuration file not found");
        }
        exists
    })
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, C4ViewError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use c4view::{config::CatalogSource, layout::Direction};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[backend]
base_url = "http://c4.internal:8080/"
cache = false

[layout]
direction = "left"
node_spacing = 40

[catalog]
source = "backend"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.backend().base_url(), "http://c4.internal:8080");
        assert!(!config.backend().cache_enabled());
        assert_eq!(config.layout().direction(), Direction::Left);
        assert_eq!(config.layout().node_spacing(), 40.0);
        assert_eq!(config.catalog().source(), CatalogSource::Backend);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(dir.path().join("nope.toml"))).unwrap_err();

        assert!(matches!(err, C4ViewError::Config(msg) if msg.contains("nope.toml")));
    }

    #[test]
    fn test_local_config_is_searched_first() {
        let candidates = candidate_paths();

        assert_eq!(candidates[0], PathBuf::from(LOCAL_CONFIG));
        assert!(candidates[1..].iter().all(|path| path.ends_with(CONFIG_FILE)));
    }

    #[test]
    fn test_find_config_takes_first_existing() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("c4view").join(CONFIG_FILE);
        let system = dir.path().join("system").join(CONFIG_FILE);
        let candidates = vec![local.clone(), system.clone()];

        assert_eq!(find_config(&candidates), None);

        fs::create_dir_all(system.parent().unwrap()).unwrap();
        fs::write(&system, "").unwrap();
        assert_eq!(find_config(&candidates), Some(system.as_path()));

        fs::create_dir_all(local.parent().unwrap()).unwrap();
        fs::write(&local, "[layout]\ndirection = \"up\"\n").unwrap();
        assert_eq!(find_config(&candidates), Some(local.as_path()));

        let config = load_config_file(find_config(&candidates).unwrap()).unwrap();
        assert_eq!(config.layout().direction(), Direction::Up);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout]\ndirection = 3\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, C4ViewError::Config(msg) if msg.starts_with("Failed to parse TOML")));
    }
}
