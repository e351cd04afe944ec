//! In-memory bridge for testing.
//!
//! Serves a fixed set of lights without any network access and can be
//! switched into a failing state to simulate an unreachable bridge.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use huesight_common::{Light, LightState};

use crate::client::BridgeClient;
use crate::error::{BridgeError, Result};

/// Bridge double returning a fixed light list.
///
/// Clones share the reachability switch and call counter.
#[derive(Debug, Clone)]
pub struct MockBridgeClient {
    lights: Vec<Light>,
    reachable: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockBridgeClient {
    /// Create a reachable bridge serving `lights` in the given order.
    pub fn new(lights: Vec<Light>) -> Self {
        Self {
            lights,
            reachable: Arc::new(AtomicBool::new(true)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a bridge whose every query fails.
    pub fn unreachable() -> Self {
        let bridge = Self::new(Vec::new());
        bridge.set_reachable(false);
        bridge
    }

    /// Make subsequent queries succeed or fail.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Number of `list_lights` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BridgeClient for MockBridgeClient {
    async fn list_lights(&self) -> Result<Vec<Light>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.reachable.load(Ordering::SeqCst) {
            Ok(self.lights.clone())
        } else {
            Err(BridgeError::UnexpectedResponse(
                "mock bridge unreachable".to_string(),
            ))
        }
    }
}

/// Build a light with the given identity and state values.
#[allow(clippy::too_many_arguments)]
pub fn light(
    id: u32,
    name: &str,
    unique_id: &str,
    on: bool,
    reachable: bool,
    bri: u8,
    hue: u16,
    sat: u8,
) -> Light {
    Light::new(id, name, unique_id).with_state(LightState {
        on,
        reachable,
        bri,
        hue,
        sat,
    })
}
