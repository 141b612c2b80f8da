//! Configuration file loading
//!
//! Handles loading configuration from TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::io;
use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
            _ => ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            },
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// The first file that exists and parses wins.
    pub fn load_default() -> Option<Config> {
        for path in Self::default_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => log::warn!("Ignoring config {}: {}", path.display(), e),
            }
        }
        None
    }

    /// Get default configuration file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide config
        paths.push(PathBuf::from("/etc/rocctl/config.toml"));

        // User config
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("rocctl").join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("rocctl.toml"));
        paths.push(PathBuf::from(".rocctl.toml"));

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClockDomain;
    use std::io::Write;

    #[test]
    fn test_default_paths_order() {
        let paths = ConfigFile::default_paths();
        assert_eq!(paths.first(), Some(&PathBuf::from("/etc/rocctl/config.toml")));
        assert_eq!(paths.last(), Some(&PathBuf::from(".rocctl.toml")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_unreadable_path_is_not_reported_missing() {
        let dir = tempfile::tempdir().unwrap();

        let result = ConfigFile::load(dir.path());
        match result {
            Err(ConfigError::ReadError { path, .. }) => {
                assert_eq!(path, dir.path().display().to_string());
            }
            other => panic!("Expected ReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[clocks]\ndomains = [\"df\"]").unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.clocks.domains, vec![ClockDomain::Df]);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gpu\nindex = ").unwrap();

        let result = ConfigFile::load(file.path());
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }
}
