//! # Application Configuration
//!
//! Storage and export settings read once at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                                │
//! │     platform data dir, export to ".", 5 MiB quota, A4 landscape         │
//! │                                                                         │
//! │  2. Config file                                                         │
//! │     ~/.config/faktur/config.toml (Linux)                                │
//! │     ~/Library/Application Support/id.faktur.faktur/config.toml (macOS)  │
//! │                                                                         │
//! │  3. Environment variables                                               │
//! │     FAKTUR_DB_PATH, FAKTUR_EXPORT_DIR, FAKTUR_STORAGE_QUOTA             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```toml
//! # config.toml
//! [storage]
//! database_path = "/home/ana/faktur.db"
//! quota_bytes = 5242880
//!
//! [export]
//! output_dir = "/home/ana/Invoices"
//! raster_scale = 2.0
//! jpeg_quality = 98
//! ```
//!
//! Configuration is read-only after startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use faktur_db::DEFAULT_MAX_VALUE_BYTES;

use crate::export::{ExportOptions, RasterOptions};

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

/// Where and how much the editor stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Largest value accepted per key, in bytes.
    pub quota_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            database_path: None,
            quota_bytes: DEFAULT_MAX_VALUE_BYTES,
        }
    }
}

/// PDF export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub raster_scale: f64,
    pub window_width: u32,
    pub window_height: u32,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let options = ExportOptions::default();
        ExportConfig {
            output_dir: PathBuf::from("."),
            raster_scale: options.raster.scale,
            window_width: options.raster.window_width,
            window_height: options.raster.window_height,
            page_width_mm: options.page_width_mm,
            page_height_mm: options.page_height_mm,
            jpeg_quality: options.jpeg_quality,
        }
    }
}

impl ExportConfig {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            raster: RasterOptions {
                scale: self.raster_scale,
                window_width: self.window_width,
                window_height: self.window_height,
            },
            page_width_mm: self.page_width_mm,
            page_height_mm: self.page_height_mm,
            jpeg_quality: self.jpeg_quality,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `FAKTUR_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("FAKTUR_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("FAKTUR_EXPORT_DIR") {
            debug!(dir = %dir, "Overriding export directory from environment");
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(quota) = lookup("FAKTUR_STORAGE_QUOTA") {
            self.storage.quota_bytes = quota.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("FAKTUR_STORAGE_QUOTA is not a byte count: {}", quota))
            })?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.quota_bytes == 0 {
            return Err(ConfigError::Invalid("quota_bytes must be greater than 0".into()));
        }

        let export = &self.export;
        if !(export.raster_scale.is_finite() && export.raster_scale > 0.0) {
            return Err(ConfigError::Invalid("raster_scale must be positive".into()));
        }
        if export.window_width == 0 || export.window_height == 0 {
            return Err(ConfigError::Invalid("capture window must not be empty".into()));
        }
        if export.page_width_mm <= 0.0 || export.page_height_mm <= 0.0 {
            return Err(ConfigError::Invalid("page size must be positive".into()));
        }
        if !(1..=100).contains(&export.jpeg_quality) {
            return Err(ConfigError::Invalid("jpeg_quality must be within 1-100".into()));
        }

        Ok(())
    }

    /// Database file: the configured one, else `<data dir>/faktur.db`.
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("faktur.db")))
            .unwrap_or_else(|| PathBuf::from("faktur.db"))
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("id", "faktur", "faktur")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.quota_bytes, 5 * 1024 * 1024);
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert_eq!(config.export.options(), ExportOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [export]
            output_dir = "/tmp/invoices"
            jpeg_quality = 90
            "#,
        )
        .unwrap();

        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/invoices"));
        assert_eq!(config.export.jpeg_quality, 90);
        assert_eq!(config.export.raster_scale, 2.0);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(|name| match name {
                "FAKTUR_DB_PATH" => Some("/data/faktur.db".to_string()),
                "FAKTUR_STORAGE_QUOTA" => Some("1024".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.database_path(), PathBuf::from("/data/faktur.db"));
        assert_eq!(config.storage.quota_bytes, 1024);
        assert_eq!(config.export.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_bad_quota_override() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|name| (name == "FAKTUR_STORAGE_QUOTA").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_empty_capture() {
        let mut config = AppConfig::default();
        config.export.raster_scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.export.window_height = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.export.page_width_mm = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let path = std::env::temp_dir().join("faktur-no-such-config.toml");
        let config = AppConfig::load(Some(path)).unwrap();
        assert_eq!(config.export.jpeg_quality, 98);
    }
}
