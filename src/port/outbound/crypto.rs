//! Crypto price data port.

use async_trait::async_trait;

use crate::domain::crypto::{filter_assets, CryptoAsset};
use crate::error::Result;

/// A source of crypto asset listings.
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The top assets by market cap.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be reached or decoded.
    async fn top_assets(&self) -> Result<Vec<CryptoAsset>>;

    /// Assets whose symbol or name contains `query`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`CryptoProvider::top_assets`].
    async fn search(&self, query: &str) -> Result<Vec<CryptoAsset>> {
        let assets = self.top_assets().await?;
        Ok(filter_assets(assets, query))
    }
}
