//! Configuration for the Prometheus exporter.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use huesight_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] huesight_common::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete exporter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Bridge connection settings.
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Prometheus exporter settings.
    #[serde(default)]
    pub prometheus: PrometheusConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hue bridge connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Base URL of the bridge (default: "http://philips-hue").
    #[serde(default = "default_bridge_url")]
    pub url: String,

    /// API username issued by the bridge during pairing.
    /// Empty means the exporter has not been paired yet.
    #[serde(default)]
    pub username: String,

    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_bridge_url() -> String {
    "http://philips-hue".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl BridgeConfig {
    /// Whether an API username has been configured.
    pub fn has_username(&self) -> bool {
        !self.username.trim().is_empty()
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            url: default_bridge_url(),
            username: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Prometheus HTTP endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrometheusConfig {
    /// Address to listen on (default: "0.0.0.0:9100").
    /// A bare ":port" listens on all interfaces.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Path for metrics endpoint (default: "/metrics").
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_listen() -> String {
    "0.0.0.0:9100".to_string()
}

fn default_path() -> String {
    "/metrics".to_string()
}

impl PrometheusConfig {
    /// Resolve the listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let listen = if self.listen.starts_with(':') {
            format!("0.0.0.0{}", self.listen)
        } else {
            self.listen.clone()
        };

        listen.parse().map_err(|_| {
            ConfigError::Validation(format!("Invalid listen address: {}", self.listen))
        })
    }
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
        }
    }
}

/// Paths served by the exporter itself.
const RESERVED_PATHS: &[&str] = &["/", "/health"];

impl ExporterConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: ExporterConfig = huesight_common::load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ExporterConfig = huesight_common::parse_config(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// A missing username is not a validation error; the binary reports it
    /// separately and exits cleanly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bridge.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if !self.bridge.url.starts_with("http://") && !self.bridge.url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "Bridge URL must start with http:// or https://: {}",
                self.bridge.url
            )));
        }

        self.prometheus.listen_addr()?;

        if !self.prometheus.path.starts_with('/') {
            return Err(ConfigError::Validation(
                "Metrics path must start with /".to_string(),
            ));
        }

        if RESERVED_PATHS.contains(&self.prometheus.path.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Metrics path {} is reserved",
                self.prometheus.path
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huesight_common::LogFormat;

    #[test]
    fn test_parse_minimal_config() {
        let config = ExporterConfig::parse("{}").unwrap();

        assert_eq!(config.bridge.url, "http://philips-hue");
        assert_eq!(config.bridge.username, "");
        assert!(!config.bridge.has_username());
        assert_eq!(config.bridge.timeout(), Duration::from_secs(10));
        assert_eq!(config.prometheus.listen, "0.0.0.0:9100");
        assert_eq!(config.prometheus.path, "/metrics");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            bridge: {
                url: "http://192.168.1.20",
                username: "VBYPKZXBqwcLCSdzj5yLW1gjK2fb9XCOSxQ1dP7B",
                timeout_secs: 3
            },
            prometheus: {
                listen: "127.0.0.1:9200",
                path: "/hue/metrics"
            },
            logging: {
                level: "debug",
                format: "json"
            }
        }"#;

        let config = ExporterConfig::parse(json).unwrap();

        assert_eq!(config.bridge.url, "http://192.168.1.20");
        assert!(config.bridge.has_username());
        assert_eq!(config.bridge.timeout_secs, 3);
        assert_eq!(config.prometheus.listen, "127.0.0.1:9200");
        assert_eq!(config.prometheus.path, "/hue/metrics");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_listen_port_only() {
        let config = PrometheusConfig {
            listen: ":9100".to_string(),
            ..Default::default()
        };

        assert_eq!(
            config.listen_addr().unwrap(),
            "0.0.0.0:9100".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_validate_invalid_listen() {
        let json = r#"{
            prometheus: { listen: "not-an-address" }
        }"#;

        let result = ExporterConfig::parse(json);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid listen address")
        );
    }

    #[test]
    fn test_validate_invalid_path() {
        let json = r#"{
            prometheus: { path: "no-leading-slash" }
        }"#;

        let result = ExporterConfig::parse(json);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("must start with /")
        );
    }

    #[test]
    fn test_validate_reserved_path() {
        let result = ExporterConfig::parse(r#"{ prometheus: { path: "/health" } }"#);
        assert!(result.unwrap_err().to_string().contains("reserved"));

        let result = ExporterConfig::parse(r#"{ prometheus: { path: "/" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let result = ExporterConfig::parse(r#"{ bridge: { timeout_secs: 0 } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_bridge_url_scheme() {
        let result = ExporterConfig::parse(r#"{ bridge: { url: "philips-hue" } }"#);
        assert!(result.unwrap_err().to_string().contains("http://"));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ bridge: {{ username: "abc" }} }}"#).unwrap();

        let config = ExporterConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.bridge.username, "abc");
    }

    #[test]
    fn test_load_from_file_validates() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ prometheus: {{ path: "/health" }} }}"#).unwrap();

        let result = ExporterConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ExporterConfig::load_from_file("/nonexistent/huesight.json5");

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_parse_syntax_error() {
        let result = ExporterConfig::parse("{ bridge: ");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
