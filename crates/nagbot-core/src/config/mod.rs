//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a serde default so an empty file is valid.

pub mod defaults;
pub mod logging;
pub mod monitoring;
pub mod poster;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::defaults::DefaultSettingsConfig;
pub use self::logging::LoggingConfig;
pub use self::monitoring::MonitoringConfig;
pub use self::poster::PosterConfig;
pub use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key-value store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Monitoring backend connection settings.
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    /// Where report messages are delivered.
    #[serde(default)]
    pub poster: PosterConfig,
    /// Values seeded into the store for settings nobody configured yet.
    #[serde(default)]
    pub defaults: DefaultSettingsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `NAGBOT__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("NAGBOT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: AppConfig = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.store.provider, "memory");
        assert_eq!(config.monitoring.request_timeout_seconds, 10);
        assert_eq!(config.defaults.logs_limit, 50);
        assert_eq!(config.defaults.logs_start_time_seconds, 86_400);
        assert_eq!(config.defaults.report_frequency_minutes, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [store]
            provider = "redis"

            [monitoring]
            url = "http://nagios.internal/nagios/cgi-bin"
            username = "nagiosadmin"

            [defaults]
            logs_limit = 20
        "#;

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.store.provider, "redis");
        assert_eq!(config.store.redis.key_prefix, "nagbot:");
        assert_eq!(config.monitoring.url, "http://nagios.internal/nagios/cgi-bin");
        assert_eq!(config.monitoring.username.as_deref(), Some("nagiosadmin"));
        assert_eq!(config.defaults.logs_limit, 20);
        assert_eq!(config.defaults.report_frequency_minutes, 10);
    }
}
