//! HueSight Bridge Client
//!
//! Minimal client for the Hue bridge REST API v1, covering what the exporter
//! needs:
//! - [`BridgeClient`] trait for listing lights (the seam the collector is generic over)
//! - [`HttpBridgeClient`] implementation backed by `reqwest`
//! - Pairing via [`HttpBridgeClient::register`]
//! - [`mock`] bridge double for tests of code built on [`BridgeClient`]
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use huesight_bridge_client::{BridgeClient, HttpBridgeClient};
//!
//! let client = HttpBridgeClient::new("http://philips-hue", username, Duration::from_secs(10))?;
//! for light in client.list_lights().await? {
//!     println!("{} {}", light.id, light.name);
//! }
//! ```

mod client;
mod error;
pub mod mock;
mod response;

pub use client::{BridgeClient, HttpBridgeClient};
pub use error::{BridgeError, LINK_BUTTON_NOT_PRESSED, Result, UNAUTHORIZED_USER};

// Re-export the light model from huesight-common
pub use huesight_common::{Light, LightState};
