//! Network and contract address configuration.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Sonic mainnet.
pub const DEFAULT_CHAIN_ID: u64 = 146;
pub const DEFAULT_RPC_URL: &str = "https://rpc.soniclabs.com";
pub const DEFAULT_EXPLORER_URL: &str = "https://sonicscan.org";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub explorer_url: String,
    pub contracts: ContractsConfig,
}

/// Deployed contract addresses. Unset addresses disable the commands that need them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    pub usdc: Option<Address>,
    pub fee_config: Option<Address>,
    pub event_factory: Option<Address>,
    pub resolution_manager: Option<Address>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.into(),
            chain_id: DEFAULT_CHAIN_ID,
            explorer_url: DEFAULT_EXPLORER_URL.into(),
            contracts: ContractsConfig::default(),
        }
    }
}

impl ChainConfig {
    /// Explorer link for a transaction hash.
    #[must_use]
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{tx_hash}", self.explorer_url.trim_end_matches('/'))
    }

    /// Explorer link for an address.
    #[must_use]
    pub fn address_url(&self, address: &Address) -> String {
        format!("{}/address/{address}", self.explorer_url.trim_end_matches('/'))
    }
}

impl ContractsConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when any address is unset.
    pub fn require_all(&self) -> Result<[Address; 4]> {
        let require = |value: Option<Address>, field: &'static str| {
            value.ok_or(ConfigError::MissingField { field })
        };
        Ok([
            require(self.usdc, "chain.contracts.usdc")?,
            require(self.fee_config, "chain.contracts.fee_config")?,
            require(self.event_factory, "chain.contracts.event_factory")?,
            require(self.resolution_manager, "chain.contracts.resolution_manager")?,
        ])
    }
}
