//! Decoding of Hue REST API v1 payloads.

use std::collections::HashMap;

use huesight_common::Light;
use serde::Deserialize;

use crate::error::{BridgeError, LINK_BUTTON_NOT_PRESSED, Result};

/// One entry of the result array returned by write requests and errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiResult {
    Success(serde_json::Value),
    Error(ApiErrorBody),
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    code: u16,
    #[serde(default)]
    address: String,
    #[serde(default)]
    description: String,
}

impl From<ApiErrorBody> for BridgeError {
    fn from(body: ApiErrorBody) -> Self {
        if body.code == LINK_BUTTON_NOT_PRESSED {
            BridgeError::LinkButtonNotPressed
        } else {
            BridgeError::api(body.code, body.address, body.description)
        }
    }
}

/// Decode the body of `GET /api/<username>/lights`.
///
/// On success the bridge returns an object keyed by light id; on failure it
/// returns an array of error entries with HTTP 200. Lights are returned
/// sorted by id.
pub(crate) fn parse_lights(body: &str) -> Result<Vec<Light>> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if value.is_array() {
        let results: Vec<ApiResult> = serde_json::from_value(value)?;
        return Err(first_error(results).unwrap_or_else(|| {
            BridgeError::UnexpectedResponse("result array in place of lights object".to_string())
        }));
    }

    let raw: HashMap<String, Light> = serde_json::from_value(value)?;

    let mut lights = raw
        .into_iter()
        .map(|(key, mut light)| {
            light.id = key
                .parse()
                .map_err(|_| BridgeError::InvalidLightId(key.clone()))?;
            Ok(light)
        })
        .collect::<Result<Vec<_>>>()?;

    lights.sort_by_key(|light| light.id);
    Ok(lights)
}

/// Decode the body of a pairing request (`POST /api`) into the issued username.
pub(crate) fn parse_registration(body: &str) -> Result<String> {
    let results: Vec<ApiResult> = serde_json::from_str(body)?;

    for result in results {
        match result {
            ApiResult::Success(value) => {
                if let Some(username) = value.get("username").and_then(|u| u.as_str()) {
                    return Ok(username.to_string());
                }
            }
            ApiResult::Error(body) => return Err(body.into()),
        }
    }

    Err(BridgeError::UnexpectedResponse(
        "no username in pairing response".to_string(),
    ))
}

fn first_error(results: Vec<ApiResult>) -> Option<BridgeError> {
    results.into_iter().find_map(|result| match result {
        ApiResult::Error(body) => Some(body.into()),
        ApiResult::Success(_) => None,
    })
}
