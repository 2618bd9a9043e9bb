//! Configuration file loading for the CLI
//!
//! Configuration is looked up in order: an explicit path, the local
//! `argmap/config.toml`, then the platform config directory. Without any
//! file the defaults apply.

use std::{
    io,
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use argmap::{ArgmapError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ArgmapError {
    fn from(err: ConfigError) -> Self {
        ArgmapError::Io(io::Error::other(err.to_string()))
    }
}

/// Find and load the configuration.
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ArgmapError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("argmap/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "argmap", "argmap") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ArgmapError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<AppConfig, ArgmapError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            "[layout]\n\
             horizontal_spacing = 30.0\n\
             fit_vertically = 10.0\n\
             \n\
             [style.claim]\n\
             maxWidth = 150.0\n",
        )
        .unwrap();

        assert_eq!(config.layout().horizontal_spacing(), 30.0);
        assert_eq!(config.layout().vertical_spacing(), 40.0);
        assert_eq!(config.layout().fit_vertically(), Some(10.0));
        assert_eq!(config.style().claim().max_width(), 150.0);
        assert_eq!(config.style().scale(), 1.0);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();

        assert_eq!(config.layout(), AppConfig::default().layout());
        assert_eq!(config.style(), AppConfig::default().style());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let err = parse_config("[layout]\nmargin = \"wide\"").unwrap_err();

        assert!(err.to_string().contains("Failed to parse TOML"), "{err}");
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = load_config(Some("/definitely/not/here.toml")).unwrap_err();

        assert!(err.to_string().contains("Missing configuration file"), "{err}");
    }
}
