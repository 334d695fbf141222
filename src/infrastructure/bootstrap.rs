//! Composition root: builds adapters and services from [`Config`].

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use crate::adapter::inbound::cli::paths;
use crate::adapter::outbound::coingecko::CoinGeckoClient;
use crate::adapter::outbound::espn::EspnClient;
use crate::adapter::outbound::fixtures::{FixtureCryptoProvider, FixtureSportsProvider};
use crate::adapter::outbound::nba::NbaStatsClient;
use crate::adapter::outbound::pinata::PinataStore;
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteMarketRegistry};
use crate::application::cache::DataCache;
use crate::application::catalog::{CryptoCatalog, SportsCatalog, SportsSettings};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::clock::{Clock, SystemClock};
use crate::port::outbound::crypto::CryptoProvider;
use crate::port::outbound::evidence::EvidenceStore;
use crate::port::outbound::registry::MarketRegistry;
use crate::port::outbound::sports::SportsProvider;

#[cfg(feature = "chain")]
use alloy_primitives::Address;
#[cfg(feature = "chain")]
use tracing::info;

#[cfg(feature = "chain")]
use crate::adapter::outbound::chain::{ChainClient, ContractAddresses};
#[cfg(feature = "chain")]
use crate::application::{
    create::CreateMarketService, market::MarketService, resolution::ResolutionService,
    wallet::WalletService,
};

/// Shared state for one CLI invocation.
pub struct AppContext {
    pub config: Config,
    clock: Arc<dyn Clock>,
    cache: Arc<DataCache>,
}

impl AppContext {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        let ttl = i64::try_from(config.data.cache_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        let cache = Arc::new(DataCache::with_clock(ttl, Arc::clone(&clock)));
        Self {
            config,
            clock,
            cache,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// ESPN, then NBA stats, then the local fixture file.
    #[must_use]
    pub fn sports_providers(&self) -> Vec<Arc<dyn SportsProvider>> {
        let data = &self.config.data;
        let fixtures = data
            .sports_fixtures
            .clone()
            .unwrap_or_else(|| paths::fixtures_dir().join("sports.json"));
        vec![
            Arc::new(EspnClient::new(&data.espn_url, self.clock())),
            Arc::new(NbaStatsClient::new(&data.nba_url)),
            Arc::new(FixtureSportsProvider::new(fixtures)),
        ]
    }

    /// CoinGecko, then the local fixture file.
    #[must_use]
    pub fn crypto_providers(&self) -> Vec<Arc<dyn CryptoProvider>> {
        let data = &self.config.data;
        let fixtures = data
            .crypto_fixtures
            .clone()
            .unwrap_or_else(|| paths::fixtures_dir().join("crypto.json"));
        vec![
            Arc::new(CoinGeckoClient::new(&data.coingecko_url)),
            Arc::new(FixtureCryptoProvider::new(fixtures)),
        ]
    }

    #[must_use]
    pub fn sports_catalog(&self) -> SportsCatalog {
        let data = &self.config.data;
        SportsCatalog::new(
            self.sports_providers(),
            Arc::clone(&self.cache),
            self.clock(),
            SportsSettings {
                default_query_days: data.default_query_days,
                max_query_days: data.max_query_days,
                min_lead_hours: data.min_lead_hours,
            },
        )
    }

    #[must_use]
    pub fn crypto_catalog(&self) -> CryptoCatalog {
        CryptoCatalog::new(self.crypto_providers(), Arc::clone(&self.cache))
    }

    #[must_use]
    pub fn evidence_store(&self) -> Arc<dyn EvidenceStore> {
        let ipfs = &self.config.ipfs;
        Arc::new(PinataStore::new(
            &ipfs.api_url,
            &ipfs.gateway_url,
            ipfs.jwt.clone(),
        ))
    }

    /// Open (and migrate) the created-markets database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn registry(&self) -> Result<Arc<dyn MarketRegistry>> {
        let path = PathBuf::from(&self.config.database);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        debug!(database = %self.config.database, "Opening registry");
        let pool = create_pool(&self.config.database)?;
        run_migrations(&pool)?;
        Ok(Arc::new(SqliteMarketRegistry::new(pool)))
    }

    /// Contract client for the configured network.
    ///
    /// # Errors
    ///
    /// Returns an error if a contract address is missing or the RPC URL or
    /// private key is malformed.
    #[cfg(feature = "chain")]
    pub fn chain(&self) -> Result<Arc<ChainClient>> {
        let [usdc, fee_config, event_factory, resolution_manager] =
            self.config.chain.contracts.require_all()?;
        let client = ChainClient::new(
            &self.config.chain.rpc_url,
            ContractAddresses {
                usdc,
                fee_config,
                event_factory,
                resolution_manager,
            },
            self.config.wallet.private_key.as_deref(),
        )?;
        info!(
            rpc_url = %self.config.chain.rpc_url,
            wallet = ?client.wallet_address(),
            "Chain client ready"
        );
        Ok(Arc::new(client))
    }

    /// The signing wallet, else the configured watch address.
    #[cfg(feature = "chain")]
    fn user(&self, chain: &ChainClient) -> Option<Address> {
        chain.wallet_address().or(self.config.wallet.address)
    }

    /// # Errors
    ///
    /// See [`AppContext::chain`].
    #[cfg(feature = "chain")]
    pub fn market_service(&self) -> Result<MarketService> {
        let chain = self.chain()?;
        let user = self.user(&chain);
        Ok(MarketService::new(chain.clone(), chain, user))
    }

    /// # Errors
    ///
    /// See [`AppContext::chain`].
    #[cfg(feature = "chain")]
    pub fn wallet_service(&self) -> Result<(WalletService, Arc<ChainClient>)> {
        let chain = self.chain()?;
        let owner = self.user(&chain);
        Ok((WalletService::new(chain.clone(), owner), chain))
    }

    /// # Errors
    ///
    /// See [`AppContext::chain`] and [`AppContext::registry`].
    #[cfg(feature = "chain")]
    pub fn create_service(&self) -> Result<CreateMarketService> {
        let chain = self.chain()?;
        let creator = chain.wallet_address();
        Ok(CreateMarketService::new(
            chain.clone(),
            chain.clone(),
            chain,
            self.registry()?,
            self.clock(),
            creator,
        ))
    }

    /// # Errors
    ///
    /// See [`AppContext::chain`].
    #[cfg(feature = "chain")]
    pub fn resolution_service(&self) -> Result<ResolutionService> {
        let chain = self.chain()?;
        Ok(ResolutionService::new(chain, self.evidence_store()))
    }
}
