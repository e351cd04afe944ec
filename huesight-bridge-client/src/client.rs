//! Bridge client abstraction and its HTTP implementation.

use std::future::Future;
use std::time::Duration;

use huesight_common::Light;
use tracing::debug;

use crate::error::{BridgeError, Result};
use crate::response::{parse_lights, parse_registration};

/// Read access to the lights of one bridge.
///
/// Implementations must be safe to call from concurrent scrapes.
pub trait BridgeClient: Send + Sync + 'static {
    /// Fetch the current set of lights in one query.
    fn list_lights(&self) -> impl Future<Output = Result<Vec<Light>>> + Send;
}

/// Hue bridge client speaking the REST API v1 over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBridgeClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
}

impl HttpBridgeClient {
    /// Create a client for the bridge at `base_url` authenticating as `username`.
    ///
    /// `timeout` bounds every request made by this client.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(BridgeError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            username: username.into(),
        })
    }

    /// Get the bridge base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one pairing request and return the username the bridge grants.
    ///
    /// The bridge answers [`BridgeError::LinkButtonNotPressed`] until its
    /// physical button has been pressed; the request can then be repeated.
    /// The username this client was built with is not used.
    pub async fn register(&self, devicetype: &str) -> Result<String> {
        let url = format!("{}/api", self.base_url);

        debug!(bridge = %self.base_url, devicetype, "Sending pairing request");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "devicetype": devicetype }))
            .send()
            .await?;

        let body = read_body(response, "/api").await?;
        parse_registration(&body)
    }
}

impl BridgeClient for HttpBridgeClient {
    async fn list_lights(&self) -> Result<Vec<Light>> {
        let url = format!("{}/api/{}/lights", self.base_url, self.username);

        debug!(bridge = %self.base_url, "Querying lights");

        let response = self.http.get(&url).send().await?;
        let body = read_body(response, "/lights").await?;
        parse_lights(&body)
    }
}

async fn read_body(response: reqwest::Response, resource: &str) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(BridgeError::Status {
            status: status.as_u16(),
            resource: resource.to_string(),
        });
    }

    Ok(response.text().await?)
}
