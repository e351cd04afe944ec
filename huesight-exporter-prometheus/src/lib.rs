//! Prometheus metrics exporter for Hue bridges.
//!
//! This crate queries a Hue bridge for the state of its lights on every scrape
//! and exposes the result via an HTTP `/metrics` endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │   Hue Bridge    │<────│    Collector    │<────│   HTTP Server   │
//! │ (/api/*/lights) │     │    (mapping)    │     │   (/metrics)    │
//! └─────────────────┘     └─────────────────┘     └─────────────────┘
//! ```
//!
//! Each scrape performs exactly one bridge query. Nothing is cached between
//! scrapes; a failed query is reported as `up 0` instead of an HTTP error.
//!
//! # Usage
//!
//! ```bash
//! huesight-exporter-prometheus --bridge-url http://philips-hue --username <username>
//! ```
//!
//! Obtain a username by pressing the bridge link button and running
//! `huesight-exporter-prometheus pair`.
//!
//! # Configuration
//!
//! See [`config::ExporterConfig`] for configuration options.

pub mod cli;
pub mod collector;
pub mod config;
pub mod exposition;
pub mod http;
pub mod mapping;

pub use cli::{Args, Command};
pub use collector::{LightCollector, SharedCollector};
pub use config::ExporterConfig;
pub use http::HttpServer;
pub use mapping::{MetricDescriptor, MetricRecord};
