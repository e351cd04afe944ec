//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use huesight_bridge_client::BridgeError;

use crate::config::{ConfigError, ExporterConfig};

/// Message printed when no API username is configured.
pub const MISSING_USERNAME: &str = "Please set a username";

/// Hint logged when the bridge rejects the configured username.
pub const PAIRING_HINT: &str =
    "The bridge does not know this username; press the link button and run the pair subcommand";

/// Advice for a failed startup validation, if there is any.
pub fn validation_hint(err: &BridgeError) -> Option<&'static str> {
    err.is_unauthorized().then_some(PAIRING_HINT)
}

/// Prometheus exporter for Hue bridge light state.
#[derive(Parser, Debug, Clone)]
#[command(name = "huesight-exporter-prometheus")]
#[command(about = "Export Hue bridge light state as Prometheus metrics")]
#[command(version)]
pub struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// URL of the Hue bridge device [default: http://philips-hue].
    #[arg(long)]
    pub bridge_url: Option<String>,

    /// Authorised API username.
    #[arg(long)]
    pub username: Option<String>,

    /// HTTP listen address [default: 0.0.0.0:9100].
    #[arg(long)]
    pub listen_address: Option<String>,

    /// Metrics path [default: /metrics].
    #[arg(long)]
    pub metrics_path: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Request an API username from the bridge.
    ///
    /// Press the link button on the bridge, then run this within 30 seconds.
    Pair {
        /// Application and device name registered with the bridge.
        #[arg(long, default_value = "huesight#exporter")]
        devicetype: String,
    },
}

impl Args {
    /// Build the effective configuration: file (or defaults), then CLI overrides.
    pub fn load_config(&self) -> Result<ExporterConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ExporterConfig::load_from_file(path)?,
            None => ExporterConfig::default(),
        };

        if let Some(url) = &self.bridge_url {
            config.bridge.url = url.clone();
        }
        if let Some(username) = &self.username {
            config.bridge.username = username.clone();
        }
        if let Some(listen) = &self.listen_address {
            config.prometheus.listen = listen.clone();
        }
        if let Some(path) = &self.metrics_path {
            config.prometheus.path = path.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
