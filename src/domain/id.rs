//! Domain identifier types with proper encapsulation.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Market identifier: the 32-byte content hash of the market parameters.
///
/// The contract keys events by this hash, so the same value doubles as
/// the duplicate-detection fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketId(B256);

impl MarketId {
    /// Wrap a raw hash.
    #[must_use]
    pub const fn new(hash: B256) -> Self {
        Self(hash)
    }

    /// The underlying 32 bytes.
    #[must_use]
    pub const fn as_b256(&self) -> B256 {
        self.0
    }

    /// Shortened form for display: first 8 characters (including `0x`)
    /// and last 6.
    #[must_use]
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..8], &full[full.len() - 6..])
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MarketId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        B256::from_str(trimmed)
            .map(Self)
            .map_err(|e| DomainError::InvalidMarketId {
                input: trimmed.to_string(),
                reason: e.to_string(),
            })
    }
}

impl From<B256> for MarketId {
    fn from(hash: B256) -> Self {
        Self(hash)
    }
}

/// Sports game identifier, e.g. `nba_401585123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Create a new `GameId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the game ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GameId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Crypto asset identifier as used by CoinGecko (`bitcoin`, `ethereum`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Create a new `AssetId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the asset ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
