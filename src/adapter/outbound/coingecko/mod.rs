//! CoinGecko market listings (public API, no key).

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::info;

use crate::adapter::outbound::http;
use crate::domain::crypto::CryptoAsset;
use crate::domain::id::AssetId;
use crate::error::Result;
use crate::port::outbound::crypto::CryptoProvider;

const PROVIDER: &str = "coingecko";

/// Number of assets requested per listing.
pub const TOP_ASSETS: usize = 150;

/// One row of `/coins/markets`. Prices are null for delisted coins.
#[derive(Debug, Deserialize)]
struct MarketRow {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    market_cap: Option<f64>,
}

impl From<MarketRow> for CryptoAsset {
    fn from(row: MarketRow) -> Self {
        Self {
            id: AssetId::new(row.id),
            symbol: row.symbol,
            name: row.name,
            image: row.image.unwrap_or_default(),
            current_price: row.current_price.unwrap_or_default(),
            market_cap: row.market_cap.unwrap_or_default(),
        }
    }
}

pub struct CoinGeckoClient {
    http: HttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: http::client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn markets_url(&self) -> String {
        format!(
            "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={TOP_ASSETS}&page=1&sparkline=false",
            self.base_url
        )
    }
}

#[async_trait]
impl CryptoProvider for CoinGeckoClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn top_assets(&self) -> Result<Vec<CryptoAsset>> {
        let url = self.markets_url();
        info!(url = %url, "Fetching CoinGecko markets");
        let rows: Vec<MarketRow> = http::get_json(&self.http, PROVIDER, &url).await?;
        Ok(rows.into_iter().map(CryptoAsset::from).collect())
    }
}
