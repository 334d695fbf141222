//! Pinata pinning configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs";

/// The JWT is loaded from `PINATA_JWT` at runtime, never from the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IpfsConfig {
    pub api_url: String,
    pub gateway_url: String,
    #[serde(skip)]
    pub jwt: Option<String>,
}

impl Default for IpfsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_PINATA_API_URL.into(),
            gateway_url: DEFAULT_GATEWAY_URL.into(),
            jwt: None,
        }
    }
}
