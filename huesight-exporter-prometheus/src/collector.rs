//! Light collector: one bridge query per scrape, mapped to metric records.

use std::sync::Arc;

use huesight_bridge_client::{BridgeClient, BridgeError};
use tracing::{error, info};

use crate::mapping::{
    DESCRIPTORS, METRICS_PER_LIGHT, MetricDescriptor, MetricRecord, light_records, up_record,
};

/// Stateless collector translating bridge queries into metric records.
///
/// Holds only the bridge handle, so one instance can serve concurrent scrapes.
#[derive(Debug)]
pub struct LightCollector<B> {
    client: B,
}

impl<B: BridgeClient> LightCollector<B> {
    /// Create a collector, querying the bridge once to validate it.
    ///
    /// The collector is returned whatever the outcome; the second element
    /// carries the validation result for the caller to act on.
    pub async fn new(client: B) -> (Self, Result<(), BridgeError>) {
        let validation = client.list_lights().await.map(|lights| {
            info!(lights = lights.len(), "Bridge connection validated");
        });

        (Self { client }, validation)
    }

    /// Get the bridge client.
    pub fn client(&self) -> &B {
        &self.client
    }

    /// Metric definitions this collector can emit.
    pub fn describe(&self) -> &'static [MetricDescriptor] {
        &DESCRIPTORS
    }

    /// Query the bridge once and produce this scrape's records.
    ///
    /// A failed query yields only `up 0`; the error is logged and never
    /// reaches the caller.
    pub async fn collect(&self) -> Vec<MetricRecord> {
        let lights = match self.client.list_lights().await {
            Ok(lights) => lights,
            Err(e) => {
                error!(error = %e, "Error getting lights");
                return vec![up_record(false)];
            }
        };

        info!("Found {} lights", lights.len());

        let mut records = Vec::with_capacity(1 + lights.len() * METRICS_PER_LIGHT);
        records.push(up_record(true));
        for light in &lights {
            records.extend(light_records(light));
        }

        records
    }
}

/// Create a shareable collector handle.
pub type SharedCollector<B> = Arc<LightCollector<B>>;
