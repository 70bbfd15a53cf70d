//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file overlaid with `FILEDESK__*` environment variables.
//! Every field carries a serde default, so an empty source yields a fully
//! usable configuration.

pub mod logging;
pub mod notification;
pub mod storage;
pub mod store;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::notification::NotificationConfig;
use self::storage::StorageConfig;
use self::store::StoreConfig;

use crate::error::{AppError, ErrorKind};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// In-memory store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Notification sink settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Domain event bus settings.
    #[serde(default)]
    pub events: EventsConfig,
    /// Storage quota settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Domain event bus configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Broadcast channel capacity. Slow subscribers lag past this many events.
    #[serde(default = "default_event_capacity")]
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_event_capacity(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional; a missing file falls back to defaults.
    /// Environment variables prefixed with `FILEDESK__` override file values,
    /// e.g. `FILEDESK__STORE__FILE_ID_START=200`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("FILEDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build config: {e}"),
                    e,
                )
            })?;

        config.try_deserialize().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to deserialize config: {e}"),
                e,
            )
        })
    }

    /// Parse configuration from an in-memory TOML string.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

fn default_event_capacity() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = AppConfig::from_toml("").expect("empty config");
        assert_eq!(config.store.file_id_start, 1);
        assert_eq!(config.store.folder_id_start, 1);
        assert_eq!(config.notifications.history_capacity, 50);
        assert_eq!(config.events.channel_capacity, 256);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [store]
            file_id_start = 200
            folder_id_start = 100

            [storage]
            quota_bytes = 1024
            "#,
        )
        .expect("valid config");
        assert_eq!(config.store.file_id_start, 200);
        assert_eq!(config.store.folder_id_start, 100);
        assert_eq!(config.store.recent_default, 6);
        assert_eq!(config.storage.quota_bytes, 1024);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("does/not/exist").expect("defaults");
        assert_eq!(config.logging.format, "pretty");
    }
}
