//! Error types for the bridge client.

use thiserror::Error;

/// Result type alias using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Hue API error type returned while the link button has not been pressed.
pub const LINK_BUTTON_NOT_PRESSED: u16 = 101;

/// Hue API error type returned for an unknown username.
pub const UNAUTHORIZED_USER: u16 = 1;

/// Errors that can occur while talking to a bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The configured bridge URL cannot be used.
    #[error("Invalid bridge URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("Bridge request failed: {0}")]
    Http(reqwest::Error),

    /// The bridge answered with a non-success HTTP status.
    #[error("Bridge returned HTTP {status} for {resource}")]
    Status { status: u16, resource: String },

    /// The response body was not the expected JSON.
    #[error("Failed to decode bridge response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The bridge reported an error in its API payload.
    #[error("Bridge API error {code} at '{address}': {description}")]
    Api {
        code: u16,
        address: String,
        description: String,
    },

    /// Pairing was attempted before the physical link button was pressed.
    #[error("Link button not pressed")]
    LinkButtonNotPressed,

    /// A light key in the `/lights` object was not a numeric id.
    #[error("Invalid light id: {0}")]
    InvalidLightId(String),

    /// The payload was valid JSON but not a shape the bridge documents.
    #[error("Unexpected bridge response: {0}")]
    UnexpectedResponse(String),
}

impl BridgeError {
    /// Create an API error.
    pub fn api(code: u16, address: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Api {
            code,
            address: address.into(),
            description: description.into(),
        }
    }

    /// Check whether the bridge rejected the configured username.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { code, .. } if *code == UNAUTHORIZED_USER)
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs embed the API username.
        Self::Http(err.without_url())
    }
}
