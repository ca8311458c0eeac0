//! User configuration.
//!
//! Read from `<config dir>/poma/config.json`:
//! - macOS: ~/Library/Application Support/poma/config.json
//! - Linux: ~/.config/poma/config.json
//! - Windows: %APPDATA%/poma/config.json
//!
//! Every field is optional in the file. Environment variables are applied
//! on top.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_REFRESH_INTERVAL_MS, ENV_API_URL, ENV_BACKEND,
};
use poma_bookmarks::{ApiConfig, Backend};
use poma_gesture::GestureThresholds;
use poma_jump::DEFAULT_REWIND_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomaConfig {
    pub api: ApiConfig,
    /// How often the active-session list is re-queried.
    pub refresh_interval_ms: u64,
    /// How far before a bookmark jump-back resumes.
    pub rewind_ms: u64,
    pub gesture: GestureThresholds,
}

impl Default for PomaConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            rewind_ms: DEFAULT_REWIND_MS,
            gesture: GestureThresholds::default(),
        }
    }
}

impl PomaConfig {
    /// Platform location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location and apply environment overrides.
    pub fn load_default() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load(&path)?,
            None => {
                tracing::warn!("no config directory on this platform, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let config: PomaConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!(path = %path.display(), backend = %config.api.describe(), "loaded config");
        Ok(config)
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Apply `POMA_BACKEND` then `POMA_API_URL` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BACKEND) {
            self.api.backend = value
                .parse::<Backend>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: ENV_BACKEND.to_string(),
                    message,
                })?;
        }

        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            let url = url.trim().to_string();
            match self.api.backend {
                Backend::Local => self.api.local_url = url,
                Backend::Cloud => self.api.cloud_url = url,
            }
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = PomaConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, PomaConfig::default());
        assert_eq!(config.refresh_interval(), Duration::from_secs(10));
        assert_eq!(config.rewind_ms, 10_000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api": {"backend": "cloud"}, "rewind_ms": 5000}"#).unwrap();

        let config = PomaConfig::load(&path).unwrap();

        assert_eq!(config.api.backend, Backend::Cloud);
        assert_eq!(config.api.local_url, poma_bookmarks::DEFAULT_LOCAL_URL);
        assert_eq!(config.rewind_ms, 5_000);
        assert_eq!(config.gesture, GestureThresholds::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            PomaConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = PomaConfig::default();
        config.refresh_interval_ms = 2_500;

        config.save(&path).unwrap();

        assert_eq!(PomaConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PomaConfig::default();
        config
            .apply_overrides(env(&[
                (ENV_BACKEND, "cloud"),
                (ENV_API_URL, "https://staging.example.com"),
            ]))
            .unwrap();

        assert_eq!(config.api.backend, Backend::Cloud);
        assert_eq!(config.api.api_v1_url(), "https://staging.example.com/api/v1/");
        assert_eq!(config.api.local_url, poma_bookmarks::DEFAULT_LOCAL_URL);
    }

    #[test]
    fn test_invalid_backend_override() {
        let mut config = PomaConfig::default();
        let result = config.apply_overrides(env(&[(ENV_BACKEND, "staging")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
