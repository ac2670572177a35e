pub mod types;

pub use types::*;

use crate::error::AppError;
use crate::stripper::StripOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings
    pub output: OutputConfig,
    /// Retained metadata
    pub metadata: MetadataConfig,
    /// UI settings
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from TOML file, or create default if not found
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if config_path.exists() {
            match Self::load_from_file(&config_path) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config: {}. Using defaults.", e);
                    return Self::default();
                }
            }
        }

        let config = Self::default();
        // Save default config for future editing
        if let Err(e) = config.save_to(&config_path) {
            warn!("Failed to save default config: {}", e);
        }
        config
    }

    /// Save configuration to a TOML file
    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(config_path, toml_string)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Load configuration from a specific file
    fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pngslim")
            .join("config.toml")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AppError> {
        let suffix = &self.output.suffix;
        if suffix.is_empty() {
            return Err(AppError::Config(
                "Output suffix must not be empty".to_string(),
            ));
        }
        if suffix.contains(['/', '\\']) {
            return Err(AppError::Config(
                "Output suffix must not contain path separators".to_string(),
            ));
        }
        if self.ui.poll_interval_ms == 0 {
            return Err(AppError::Config(
                "Poll interval must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.ui.poll_interval_ms)
    }

    /// Options handed to the stripper for every job
    pub fn strip_options(&self) -> StripOptions {
        StripOptions {
            suffix: self.output.suffix.clone(),
            compression: self.output.compression,
            keep_text: self.metadata.keep_text,
            keep_color: self.metadata.keep_color,
            keep_physical: self.metadata.keep_physical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.suffix, "_clear");
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.output.suffix = String::new();
        assert!(config.validate().is_err());

        config.output.suffix = "a/b".to_string();
        assert!(config.validate().is_err());

        config.output.suffix = "_min".to_string();
        config.ui.poll_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("[output]\nsuffix = \"_small\"\n").unwrap();
        assert_eq!(config.output.suffix, "_small");
        assert_eq!(config.output.compression, CompressionLevel::Best);
        assert!(config.metadata.keep_text);
        assert_eq!(config.ui.poll_interval_ms, 500);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = AppConfig::load(Some(&path));
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        let mut edited = config.clone();
        edited.metadata.keep_text = false;
        edited.output.compression = CompressionLevel::Fast;
        edited.save_to(&path).unwrap();
        assert_eq!(AppConfig::load(Some(&path)), edited);
    }
}
