//! Crypto asset listings with provider fallback and caching.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::cache::DataCache;
use crate::application::fallback::{first_non_empty, first_ok};
use crate::domain::crypto::CryptoAsset;
use crate::port::outbound::crypto::CryptoProvider;

const TOP_ASSETS_KEY: &str = "crypto_top150";

pub struct CryptoCatalog {
    providers: Vec<Arc<dyn CryptoProvider>>,
    cache: Arc<DataCache>,
}

impl CryptoCatalog {
    pub fn new(providers: Vec<Arc<dyn CryptoProvider>>, cache: Arc<DataCache>) -> Self {
        Self { providers, cache }
    }

    /// Top assets by market cap. Empty results are not cached.
    pub async fn top_assets(&self) -> Vec<CryptoAsset> {
        if let Some(assets) = self.cache.get::<Vec<CryptoAsset>>(TOP_ASSETS_KEY) {
            debug!(count = assets.len(), "Assets served from cache");
            return assets;
        }

        let assets = first_non_empty(&self.providers, |provider| {
            let provider = Arc::clone(provider);
            async move { provider.top_assets().await }
        })
        .await;

        if assets.is_empty() {
            warn!("All crypto providers failed");
        } else {
            info!(count = assets.len(), "Fetched top assets");
            self.cache.set(TOP_ASSETS_KEY, assets.clone());
        }
        assets
    }

    /// Search by symbol or name. The first provider that answers wins,
    /// and its answer is cached even when empty.
    pub async fn search(&self, query: &str) -> Vec<CryptoAsset> {
        let key = format!("crypto_search_{}", query.to_lowercase());
        if let Some(assets) = self.cache.get::<Vec<CryptoAsset>>(&key) {
            return assets;
        }

        let found = first_ok(&self.providers, |provider| {
            let provider = Arc::clone(provider);
            let query = query.to_string();
            async move { provider.search(&query).await }
        })
        .await;

        match found {
            Some(assets) => {
                debug!(query, count = assets.len(), "Asset search");
                self.cache.set(key, assets.clone());
                assets
            }
            None => Vec::new(),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
