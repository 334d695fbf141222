//! Shared HTTP plumbing for the data providers.

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ProviderError, Result};

const USER_AGENT: &str = concat!("horizon/", env!("CARGO_PKG_VERSION"));

/// Client with the crate user agent. Requests carry no timeout.
#[must_use]
pub fn client() -> HttpClient {
    HttpClient::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        })
}

/// GET `url` and decode the JSON body.
///
/// Non-2xx responses become [`ProviderError::Status`], undecodable bodies
/// [`ProviderError::Decode`].
pub async fn get_json<T>(http: &HttpClient, provider: &'static str, url: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    debug!(provider, url, "GET");
    let response = http.get(url).send().await?;
    decode(provider, response).await
}

/// Check the status and decode the JSON body of `response`.
pub async fn decode<T>(provider: &'static str, response: reqwest::Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        }
        .into());
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        ProviderError::Decode {
            provider,
            reason: e.to_string(),
        }
        .into()
    })
}
