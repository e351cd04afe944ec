use serde::{Deserialize, Serialize};

/// Maximum brightness reported by the bridge.
pub const MAX_BRIGHTNESS: u8 = 254;

/// Maximum hue reported by the bridge.
pub const MAX_HUE: u16 = 65535;

/// Maximum saturation reported by the bridge.
pub const MAX_SATURATION: u8 = 254;

/// A light registered with the bridge, as seen in one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    /// Bridge-local numeric identifier (the key of the `/lights` object).
    #[serde(default)]
    pub id: u32,

    /// Device-assigned stable identifier (e.g. "00:17:88:01:00:bd:c7:b9-0b").
    #[serde(rename = "uniqueid", default)]
    pub unique_id: String,

    /// Display name chosen by the user.
    #[serde(default)]
    pub name: String,

    /// Current state.
    #[serde(default)]
    pub state: LightState,
}

impl Light {
    /// Create a light with the given identifiers and a default (off) state.
    pub fn new(id: u32, name: impl Into<String>, unique_id: impl Into<String>) -> Self {
        Self {
            id,
            unique_id: unique_id.into(),
            name: name.into(),
            state: LightState::default(),
        }
    }

    /// Replace the state of this light.
    pub fn with_state(mut self, state: LightState) -> Self {
        self.state = state;
        self
    }
}

/// Current state of a light.
///
/// Lights that lack a capability (white bulbs have no hue, plugs have no
/// brightness) omit the field; it decodes as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    #[serde(default)]
    pub on: bool,

    #[serde(default)]
    pub reachable: bool,

    /// Brightness, 1..=254 on the device.
    #[serde(default)]
    pub bri: u8,

    /// Hue, 0..=65535 on the device.
    #[serde(default)]
    pub hue: u16,

    /// Saturation, 0..=254 on the device.
    #[serde(default)]
    pub sat: u8,
}
