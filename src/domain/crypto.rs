//! Crypto asset reference data.

use serde::{Deserialize, Serialize};

use super::id::AssetId;

/// A listed crypto asset with its latest USD price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoAsset {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub market_cap: f64,
}

impl CryptoAsset {
    /// Case-insensitive substring match on symbol or name.
    ///
    /// `term` must already be lowercased and trimmed.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.symbol.to_lowercase().contains(term) || self.name.to_lowercase().contains(term)
    }
}

/// Filter assets by a free-text query; an empty query keeps everything.
#[must_use]
pub fn filter_assets(assets: Vec<CryptoAsset>, query: &str) -> Vec<CryptoAsset> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return assets;
    }
    assets.into_iter().filter(|a| a.matches(&term)).collect()
}
