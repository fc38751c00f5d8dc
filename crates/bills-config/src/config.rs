//! The root configuration type.

use crate::{ConfigError, LogFormat, LoggingSection, ServerSection};
use bills_server::{ServerConfig, DEFAULT_SERVICE_NAME};
use bills_telemetry::{create_env_filter, LogConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete service configuration.
///
/// Load it with [`ConfigLoader`](crate::ConfigLoader), then derive the
/// runtime views with [`server_config`](Self::server_config) and
/// [`log_config`](Self::log_config).
///
/// ```
/// use bills_config::BillsConfig;
///
/// let config = BillsConfig::default();
/// assert_eq!(config.service_name, "bills");
/// assert_eq!(config.server.bind_address, "0.0.0.0:8080");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BillsConfig {
    /// Name tagged on every log event.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for BillsConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            server: ServerSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

impl BillsConfig {
    /// Local development: pretty `debug` logs, loopback address.
    #[must_use]
    pub fn development() -> Self {
        Self {
            server: ServerSection {
                bind_address: "127.0.0.1:8080".to_string(),
                ..ServerSection::default()
            },
            logging: LoggingSection {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
            },
            ..Self::default()
        }
    }

    /// Production: JSON `info` logs on all interfaces.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Checks every value the server and logger depend on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::invalid_value("service_name", "must not be empty"));
        }

        if self
            .server
            .bind_address
            .parse::<std::net::SocketAddr>()
            .is_err()
        {
            return Err(ConfigError::invalid_value(
                "server.bind_address",
                format!("invalid socket address: {}", self.server.bind_address),
            ));
        }

        if self.server.pool_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "server.pool_capacity",
                "must be positive",
            ));
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "server.max_body_bytes",
                "must be positive",
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value("logging.level", "must not be empty"));
        }

        if let Err(error) = create_env_filter(&self.logging.level) {
            return Err(ConfigError::invalid_value("logging.level", error.to_string()));
        }

        Ok(())
    }

    /// Runtime server options.
    #[must_use]
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::builder()
            .bind_address(self.server.bind_address.clone())
            .pool_capacity(self.server.pool_capacity)
            .max_body_bytes(self.server.max_body_bytes)
            .shutdown_timeout(Duration::from_secs(self.server.shutdown_timeout_secs))
            .service_name(self.service_name.clone())
            .build()
    }

    /// Logging options for [`bills_telemetry::init_logging`].
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let preset = match self.logging.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };
        preset
            .with_level(self.logging.level.clone())
            .with_service_name(self.service_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(BillsConfig::default().validate().is_ok());
        assert!(BillsConfig::development().validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = BillsConfig::development();
        assert_eq!(dev.logging.format, LogFormat::Pretty);
        assert_eq!(dev.logging.level, "debug");

        let prod = BillsConfig::production();
        assert_eq!(prod.logging.format, LogFormat::Json);
        assert_eq!(prod.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = BillsConfig::default();
        config.server.bind_address = "localhost".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.bind_address"
        ));

        let mut config = BillsConfig::default();
        config.server.pool_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = BillsConfig::default();
        config.server.max_body_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = BillsConfig::default();
        config.logging.level = String::new();
        assert!(config.validate().is_err());

        let mut config = BillsConfig::default();
        config.service_name = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_config_mapping() {
        let mut config = BillsConfig::default();
        config.service_name = "ledger".to_string();
        config.server.bind_address = "127.0.0.1:9000".to_string();
        config.server.pool_capacity = 16;
        config.server.shutdown_timeout_secs = 5;

        let server = config.server_config();
        assert_eq!(server.bind_address(), "127.0.0.1:9000");
        assert_eq!(server.pool_capacity(), 16);
        assert_eq!(server.shutdown_timeout(), Duration::from_secs(5));
        assert_eq!(server.service_name(), "ledger");
        assert!(server.validate().is_ok());
    }

    #[test]
    fn test_log_config_mapping() {
        let mut config = BillsConfig::development();
        config.logging.level = "warn".to_string();

        let log = config.log_config();
        assert!(!log.json_format);
        assert_eq!(log.level, "warn");
        assert_eq!(log.service_name, "bills");
    }
}
