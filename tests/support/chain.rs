use std::sync::Arc;

use alloy_primitives::U256;
use horizon::application::create::CreateMarketService;
use horizon::application::market::MarketService;
use horizon::application::resolution::ResolutionService;
use horizon::application::wallet::WalletService;
use horizon::domain::money::to_base_units;
use horizon::testkit::chain::{FakeChain, SIGNER};
use horizon::testkit::clock::ManualClock;
use horizon::testkit::store::{MemoryEvidenceStore, MemoryRegistry};
use rust_decimal::Decimal;

/// Every service wired to one in-memory chain.
pub struct ChainHarness {
    pub chain: Arc<FakeChain>,
    pub registry: Arc<MemoryRegistry>,
    pub evidence: Arc<MemoryEvidenceStore>,
    pub clock: Arc<ManualClock>,
}

impl Default for ChainHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainHarness {
    pub fn new() -> Self {
        Self {
            chain: Arc::new(FakeChain::default()),
            registry: Arc::new(MemoryRegistry::new()),
            evidence: Arc::new(MemoryEvidenceStore::new()),
            clock: Arc::new(ManualClock::default()),
        }
    }

    /// Give the signer `dollars` USDC.
    pub fn fund(&self, dollars: Decimal) {
        self.chain.set_balance(SIGNER, to_base_units(dollars));
    }

    pub fn allow(&self, spender: alloy_primitives::Address, dollars: Decimal) {
        self.chain.set_allowance(spender, to_base_units(dollars));
    }

    pub fn allow_units(&self, spender: alloy_primitives::Address, units: U256) {
        self.chain.set_allowance(spender, units);
    }

    pub fn create_service(&self) -> CreateMarketService {
        self.create_service_for(Some(SIGNER))
    }

    pub fn create_service_for(
        &self,
        creator: Option<alloy_primitives::Address>,
    ) -> CreateMarketService {
        CreateMarketService::new(
            Arc::clone(&self.chain) as _,
            Arc::clone(&self.chain) as _,
            Arc::clone(&self.chain) as _,
            Arc::clone(&self.registry) as _,
            Arc::clone(&self.clock) as _,
            creator,
        )
    }

    pub fn market_service(&self) -> MarketService {
        MarketService::new(
            Arc::clone(&self.chain) as _,
            Arc::clone(&self.chain) as _,
            Some(SIGNER),
        )
    }

    pub fn resolution_service(&self) -> ResolutionService {
        ResolutionService::new(
            Arc::clone(&self.chain) as _,
            Arc::clone(&self.evidence) as _,
        )
    }

    pub fn wallet_service(&self) -> WalletService {
        WalletService::new(Arc::clone(&self.chain) as _, Some(SIGNER))
    }
}
