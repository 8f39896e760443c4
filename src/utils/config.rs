//! Configuration management for KidTube
//!
//! This module handles loading and managing application configuration
//! from various sources including config files and environment variables.

use crate::utils::error::{KidTubeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog source configuration
    pub catalog: CatalogConfig,

    /// Player control surface configuration
    pub controls: ControlsConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL of the catalog endpoint (a JSON array of video records)
    pub url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Control surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Seconds of inactivity before the fullscreen overlay auto-hides
    pub overlay_hide_delay_secs: u64,

    /// Interval in seconds between playback position polls
    pub position_poll_interval_secs: u64,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            controls: ControlsConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000/videos".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            overlay_hide_delay_secs: 3,
            position_poll_interval_secs: 1,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. User config file (~/.config/kidtube/config.toml on Linux)
    /// 3. Environment variables (KIDTUBE_* prefix)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Try to load user config
        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config.merge_from_file(&user_path)?;
            }
        }

        // Apply environment variable overrides
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| KidTubeError::Config("Cannot determine user config path".to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| KidTubeError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| KidTubeError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&path, toml)
            .map_err(|e| KidTubeError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Merge configuration from a TOML file
    pub fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| KidTubeError::Config(format!("Failed to read config file: {}", e)))?;

        let file_config: Config = toml::from_str(&contents)
            .map_err(|e| KidTubeError::Config(format!("Failed to parse config file: {}", e)))?;

        *self = file_config;

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        // Example: KIDTUBE_CATALOG_URL=https://example.org/videos.json
        if let Ok(url) = std::env::var("KIDTUBE_CATALOG_URL") {
            self.catalog.url = url;
        }

        if let Ok(timeout) = std::env::var("KIDTUBE_REQUEST_TIMEOUT") {
            self.catalog.request_timeout_secs = timeout.parse()
                .map_err(|_| KidTubeError::Config("Invalid KIDTUBE_REQUEST_TIMEOUT".to_string()))?;
        }

        if let Ok(delay) = std::env::var("KIDTUBE_OVERLAY_HIDE_DELAY") {
            self.controls.overlay_hide_delay_secs = delay.parse()
                .map_err(|_| KidTubeError::Config("Invalid KIDTUBE_OVERLAY_HIDE_DELAY".to_string()))?;
        }

        if let Ok(log_level) = std::env::var("KIDTUBE_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.catalog.url.is_empty() {
            return Err(KidTubeError::Config("Catalog URL must not be empty".to_string()));
        }

        if self.controls.overlay_hide_delay_secs == 0 {
            return Err(KidTubeError::Config(
                "Overlay hide delay must be non-zero".to_string(),
            ));
        }

        if self.controls.position_poll_interval_secs == 0 {
            return Err(KidTubeError::Config(
                "Position poll interval must be non-zero".to_string(),
            ));
        }

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(KidTubeError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level, valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get user config file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kidtube").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.controls.overlay_hide_delay_secs, 3);
        assert_eq!(config.controls.position_poll_interval_secs, 1);
        assert_eq!(config.general.log_level, "info");
        assert!(config.catalog.url.ends_with("/videos"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.catalog.url = String::new();
        assert!(config.validate().is_err());

        config.catalog.url = "http://localhost:3000/videos".to_string();
        config.controls.overlay_hide_delay_secs = 0;
        assert!(config.validate().is_err());

        config.controls.overlay_hide_delay_secs = 3;
        config.general.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml).unwrap();

        assert_eq!(config.catalog.url, deserialized.catalog.url);
        assert_eq!(
            config.controls.overlay_hide_delay_secs,
            deserialized.controls.overlay_hide_delay_secs
        );
    }

    #[test]
    fn test_merge_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let custom = Config {
            catalog: CatalogConfig {
                url: "https://example.org/catalog.json".to_string(),
                request_timeout_secs: 5,
                connect_timeout_secs: 2,
            },
            ..Config::default()
        };
        std::fs::write(&path, toml::to_string(&custom).unwrap()).unwrap();

        let mut config = Config::default();
        config.merge_from_file(&path).unwrap();
        assert_eq!(config.catalog.url, "https://example.org/catalog.json");
        assert_eq!(config.catalog.request_timeout_secs, 5);
    }
}
