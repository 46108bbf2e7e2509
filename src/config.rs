//! Configuration management for crabselect
//!
//! Provides loading, saving and validation of the selection retry budget,
//! the camera name token and the logging filter.

use crate::errors::CameraError;
use crate::types::FacingMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Retry and filtering settings for device selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Attempts allowed after the first one before falling back
    pub max_retries: u32,
    /// Delay between attempts in milliseconds
    pub retry_delay_ms: u64,
    /// Case-sensitive substring a preferred camera label must contain
    pub camera_name_token: String,
    /// Facing mode used when the caller does not pass one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facing_mode: Option<FacingMode>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// env_logger filter directive used when RUST_LOG is unset
    pub filter: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_retries: crate::selector::MAX_RETRIES,
            retry_delay_ms: crate::selector::RETRY_DELAY_MS,
            camera_name_token: crate::selector::DEFAULT_CAMERA_NAME_TOKEN.to_string(),
            facing_mode: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "crabselect=info".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CameraError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            CameraError::InitializationError(format!("Failed to read config file: {}", e))
        })?;

        let config: SelectorConfig = toml::from_str(&contents).map_err(|e| {
            CameraError::InitializationError(format!("Failed to parse config file: {}", e))
        })?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CameraError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CameraError::InitializationError(format!(
                    "Failed to create config directory: {}",
                    e
                ))
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            CameraError::InitializationError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| {
            CameraError::InitializationError(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("crabselect.toml")
    }

    /// Load from default location or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.selection.max_retries > 100 {
            return Err("Max retries must be between 0 and 100".to_string());
        }
        if self.selection.retry_delay_ms > 60_000 {
            return Err("Retry delay must be at most 60000 ms".to_string());
        }
        if self.logging.filter.trim().is_empty() {
            return Err("Logging filter must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert_eq!(config.selection.max_retries, 5);
        assert_eq!(config.selection.retry_delay_ms, 1000);
        assert_eq!(config.selection.camera_name_token, "camera2 0");
        assert!(config.selection.facing_mode.is_none());
    }

    #[test]
    fn test_config_validation() {
        let config = SelectorConfig::default();
        assert!(config.validate().is_ok());

        let mut bad_retries = config.clone();
        bad_retries.selection.max_retries = 1000;
        assert!(bad_retries.validate().is_err());

        let mut bad_filter = SelectorConfig::default();
        bad_filter.logging.filter = "  ".to_string();
        assert!(bad_filter.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("nested").join("crabselect.toml");

        let mut config = SelectorConfig::default();
        config.selection.facing_mode = Some(FacingMode::Environment);
        config.selection.camera_name_token = "Rear".to_string();
        config.save_to_file(&config_path).unwrap();

        let loaded = SelectorConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_toml_format() {
        let config = SelectorConfig::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[selection]"));
        assert!(toml_string.contains("[logging]"));
        assert!(toml_string.contains("camera_name_token"));
        assert!(!toml_string.contains("facing_mode"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: SelectorConfig = toml::from_str(
            r#"
            [selection]
            facing_mode = "user"
            "#,
        )
        .unwrap();
        assert_eq!(config.selection.facing_mode, Some(FacingMode::User));
        assert_eq!(config.selection.max_retries, 5);
        assert_eq!(config.logging.filter, "crabselect=info");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = SelectorConfig::load_from_file("nonexistent_file.toml");
        assert!(result.is_ok());
        assert_eq!(result.unwrap().selection.max_retries, 5);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[selection\nmax_retries = ").unwrap();

        let err = SelectorConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, CameraError::InitializationError(_)));
    }
}
