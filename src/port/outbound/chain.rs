//! Contract ports for the market protocol.
//!
//! One trait per deployed contract. Amounts are USDC base units; the chain
//! enforces every protocol invariant, these traits only read state and
//! submit transactions.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::domain::id::MarketId;
use crate::domain::market::{EventInfo, MarketReserves, TradeSide, UserPosition};
use crate::domain::resolution::{ResolutionInfo, ResolutionState};
use crate::error::Result;

/// A mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// `0x`-prefixed transaction hash.
    pub tx_hash: String,
    pub block_number: Option<u64>,
}

/// Arguments of `EventFactory.createEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    pub category: String,
    pub title: String,
    pub description: String,
    pub resolve_at: u64,
    pub primary_source: String,
    pub rule_bytes: Vec<u8>,
    pub initial_liquidity: U256,
}

#[async_trait]
pub trait EventFactory: Send + Sync {
    /// Contract address; the spender for create-market approvals.
    fn address(&self) -> Address;

    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or mined.
    async fn create_event(&self, request: &CreateEventRequest) -> Result<TxReceipt>;

    /// Event record for `id`. Unknown ids return a zeroed record.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    async fn get_event(&self, id: MarketId) -> Result<EventInfo>;

    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    async fn creator_events(&self, creator: Address) -> Result<Vec<MarketId>>;
}

#[async_trait]
pub trait MarketAmm: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    async fn market_data(&self, amm: Address) -> Result<MarketReserves>;

    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    async fn user_position(&self, amm: Address, user: Address) -> Result<UserPosition>;

    /// Buy outcome tokens with `amount_in` USDC.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or mined.
    async fn buy(
        &self,
        amm: Address,
        side: TradeSide,
        amount_in: U256,
        min_tokens_out: U256,
    ) -> Result<TxReceipt>;

    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or mined.
    async fn provide_liquidity(&self, amm: Address, amount_in: U256) -> Result<TxReceipt>;
}

#[async_trait]
pub trait ResolutionManager: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the call fails or the state is unknown.
    async fn state(&self, id: MarketId) -> Result<ResolutionState>;

    /// # Errors
    ///
    /// Returns an error if the call fails or the state is unknown.
    async fn resolution(&self, id: MarketId) -> Result<ResolutionInfo>;

    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or mined.
    async fn report(&self, id: MarketId, outcome: bool, evidence_uri: &str) -> Result<TxReceipt>;

    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or mined.
    async fn dispute(&self, id: MarketId, reason_uri: &str) -> Result<TxReceipt>;

    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or mined.
    async fn arbiter_resolve(&self, id: MarketId, outcome: bool) -> Result<TxReceipt>;

    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or mined.
    async fn invalidate(&self, id: MarketId) -> Result<TxReceipt>;
}

#[async_trait]
pub trait UsdcToken: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    async fn balance(&self, owner: Address) -> Result<U256>;

    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256>;

    /// # Errors
    ///
    /// Returns an error if the transaction cannot be sent or mined.
    async fn approve(&self, spender: Address, amount: U256) -> Result<TxReceipt>;

    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    async fn decimals(&self) -> Result<u8>;
}

#[async_trait]
pub trait FeeSchedule: Send + Sync {
    /// Bond charged by the factory on `createEvent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    async fn create_bond(&self) -> Result<U256>;
}
