//! Pinata IPFS pinning for resolution evidence.

use std::path::Path;

use async_trait::async_trait;
use rand::Rng;
use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::adapter::outbound::http;
use crate::domain::evidence::EvidenceData;
use crate::domain::protocol::MAX_EVIDENCE_SIZE;
use crate::error::{Error, Result};
use crate::port::outbound::evidence::EvidenceStore;

const PROVIDER: &str = "pinata";
const IPFS_SCHEME: &str = "ipfs://";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PinJsonRequest<'a> {
    pinata_content: &'a EvidenceData,
    pinata_metadata: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinResponse {
    ipfs_hash: String,
}

/// Evidence store backed by the Pinata pinning API and gateway.
///
/// Without a JWT, uploads return a random placeholder URI so flows can be
/// exercised without credentials.
pub struct PinataStore {
    http: HttpClient,
    api_url: String,
    gateway_url: String,
    jwt: Option<String>,
}

impl PinataStore {
    pub fn new(api_url: impl Into<String>, gateway_url: impl Into<String>, jwt: Option<String>) -> Self {
        Self {
            http: http::client(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            gateway_url: gateway_url.into().trim_end_matches('/').to_string(),
            jwt: jwt.filter(|j| !j.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.jwt.is_some()
    }

    /// Gateway URL for an `ipfs://` URI or bare CID.
    #[must_use]
    pub fn gateway_url(&self, uri: &str) -> String {
        format!("{}/{}", self.gateway_url, cid(uri))
    }

    async fn pin(&self, request: reqwest::RequestBuilder, jwt: &str) -> Result<String> {
        let response = request.bearer_auth(jwt).send().await?;
        let pinned: PinResponse = http::decode(PROVIDER, response).await?;
        Ok(format!("{IPFS_SCHEME}{}", pinned.ipfs_hash))
    }
}

/// Strip the `ipfs://` scheme, if present.
#[must_use]
pub fn cid(uri: &str) -> &str {
    uri.strip_prefix(IPFS_SCHEME).unwrap_or(uri)
}

/// Placeholder `ipfs://Qm...` URI.
fn mock_uri() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..26)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();
    format!("{IPFS_SCHEME}Qm{suffix}")
}

#[async_trait]
impl EvidenceStore for PinataStore {
    async fn upload(&self, evidence: &EvidenceData) -> Result<String> {
        evidence.validate()?;

        let Some(jwt) = self.jwt.as_deref() else {
            warn!("Pinata JWT not configured, using mock hash");
            return Ok(mock_uri());
        };

        let body = PinJsonRequest {
            pinata_content: evidence,
            pinata_metadata: json!({
                "name": format!("Evidence-{}", evidence.event_id),
                "keyvalues": {
                    "eventId": evidence.event_id,
                    "outcome": evidence.parsed_outcome.as_str(),
                },
            }),
        };
        let request = self
            .http
            .post(format!("{}/pinning/pinJSONToIPFS", self.api_url))
            .json(&body);

        let uri = self.pin(request, jwt).await?;
        info!(event_id = %evidence.event_id, uri = %uri, "Evidence pinned");
        Ok(uri)
    }

    async fn upload_file(&self, path: &Path) -> Result<String> {
        let size = tokio::fs::metadata(path).await?.len();
        if size > MAX_EVIDENCE_SIZE {
            return Err(Error::Evidence(format!(
                "{} is {size} bytes, limit is {MAX_EVIDENCE_SIZE}",
                path.display()
            )));
        }

        let Some(jwt) = self.jwt.as_deref() else {
            warn!("Pinata JWT not configured, using mock hash");
            return Ok(mock_uri());
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "evidence".to_string());
        let bytes = tokio::fs::read(path).await?;
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(name.clone()))
            .text("pinataMetadata", json!({ "name": name }).to_string());
        let request = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", self.api_url))
            .multipart(form);

        let uri = self.pin(request, jwt).await?;
        info!(file = %name, size, uri = %uri, "File pinned");
        Ok(uri)
    }

    async fn fetch(&self, uri: &str) -> Result<EvidenceData> {
        let url = self.gateway_url(uri);
        info!(url = %url, "Fetching evidence");
        let evidence: EvidenceData = http::get_json(&self.http, PROVIDER, &url).await?;
        evidence.validate()?;
        Ok(evidence)
    }
}
