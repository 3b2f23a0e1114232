/// Application configuration management
/// Stores user preferences in <config dir>/dcon/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::docker::EngineSettings;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Docker endpoint, local defaults when unset
    pub docker_host: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Trailing lines fetched for the log pane
    pub log_tail: Option<usize>,
    /// Diagnostics file; nothing is logged when unset
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            docker_host: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_tail: None,
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine the user config directory")?;
        Ok(dir.join("dcon").join("config.toml"))
    }

    /// Load the default config file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            host: self.docker_host.clone(),
            timeout_secs: self.timeout_secs,
            log_tail: self.log_tail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "docker_host = \"unix:///run/user/1000/docker.sock\"").unwrap();
        writeln!(file, "log_tail = 500").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.docker_host.as_deref(),
            Some("unix:///run/user/1000/docker.sock")
        );
        assert_eq!(config.timeout_secs, 120);

        let settings = config.engine_settings();
        assert_eq!(settings.log_tail, Some(500));
        assert_eq!(settings.timeout_secs, 120);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();
        assert!(AppConfig::load_from(file.path()).is_err());
    }
}
