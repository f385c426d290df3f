//! Credential and configuration file management.
//!
//! The API key is resolved with a simple precedence: the
//! `ANTHROPIC_API_KEY` environment variable wins, then the `api_key`
//! field of `~/.name-scout/config.toml`. Saving always writes the file;
//! it never touches the environment.

use crate::error::NameCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const CONFIG_SUBDIR: &str = ".name-scout";
const CONFIG_FILE: &str = "config.toml";

/// Structure of `~/.name-scout/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Anthropic API key used for name generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override for the generation model id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Manager for credential resolution and persistence.
pub struct ConfigManager {
    dir: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at `~/.name-scout`.
    pub fn new() -> Result<Self, NameCheckError> {
        let home = env::var_os("HOME")
            .ok_or_else(|| NameCheckError::config("HOME is not set"))?;
        Ok(Self::with_dir(Path::new(&home).join(CONFIG_SUBDIR)))
    }

    /// Manager rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the API key: environment first, then the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Ok(key) = env::var(API_KEY_ENV) {
            let key = key.trim().to_string();
            if !key.is_empty() {
                debug!("using API key from environment");
                return Some(key);
            }
        }

        self.load()
            .ok()
            .and_then(|config| config.api_key)
            .filter(|key| !key.trim().is_empty())
    }

    /// Load the config file. A missing file is an empty config.
    pub fn load(&self) -> Result<FileConfig, NameCheckError> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(FileConfig::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            NameCheckError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            NameCheckError::config(format!("invalid TOML in {}: {}", path.display(), e))
        })
    }

    /// Persist an API key, preserving any other settings in the file.
    pub fn save_api_key(&self, api_key: &str) -> Result<(), NameCheckError> {
        let mut config = self.load().unwrap_or_default();
        config.api_key = Some(api_key.trim().to_string());
        self.save(&config)
    }

    /// Write the config file, creating the directory if needed.
    pub fn save(&self, config: &FileConfig) -> Result<(), NameCheckError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            NameCheckError::config(format!("cannot create {}: {}", self.dir.display(), e))
        })?;

        let path = self.config_path();
        let content = toml::to_string_pretty(config)
            .map_err(|e| NameCheckError::config(format!("cannot serialize config: {}", e)))?;
        fs::write(&path, content).map_err(|e| {
            NameCheckError::config(format!("cannot write {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Model override from the config file, if any.
    pub fn model_override(&self) -> Option<String> {
        self.load().ok().and_then(|config| config.model)
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_default() {
        let tmp = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(tmp.path().join("missing"));
        let config = manager.load().unwrap();
        assert!(config.api_key.is_none());
        assert!(config.model.is_none());
    }

    #[test]
    fn save_and_reload_api_key() {
        let tmp = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(tmp.path());
        manager.save_api_key("sk-test-123").unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test-123"));
    }

    #[test]
    fn save_api_key_preserves_model() {
        let tmp = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(tmp.path());
        manager
            .save(&FileConfig {
                api_key: None,
                model: Some("claude-test".to_string()),
            })
            .unwrap();

        manager.save_api_key("sk-test-456").unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test-456"));
        assert_eq!(config.model.as_deref(), Some("claude-test"));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "api_key = [not toml").unwrap();
        let manager = ConfigManager::with_dir(tmp.path());
        assert!(manager.load().is_err());
    }

    #[test]
    fn blank_file_key_resolves_to_none() {
        let tmp = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(tmp.path());
        manager.save_api_key("   ").unwrap();
        // Env var may be set on developer machines; only assert the file path.
        let from_file = manager.load().unwrap().api_key.unwrap();
        assert!(from_file.trim().is_empty());
    }
}
