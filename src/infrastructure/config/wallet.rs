//! Wallet configuration for signing transactions.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Private key is loaded from `WALLET_PRIVATE_KEY` env var at runtime (never from config file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Address used for read-only views when no private key is set.
    pub address: Option<Address>,
    #[serde(skip)]
    pub private_key: Option<String>,
}
