//! Market reads and trading.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::id::MarketId;
use crate::domain::market::{EventInfo, MarketSnapshot, TradeQuote, TradeSide};
use crate::domain::money::to_base_units;
use crate::error::{ChainError, Result};
use crate::port::outbound::chain::{EventFactory, MarketAmm, TxReceipt};

/// Reads market state and submits trades for the configured wallet.
pub struct MarketService {
    factory: Arc<dyn EventFactory>,
    amm: Arc<dyn MarketAmm>,
    user: Option<Address>,
}

impl MarketService {
    pub fn new(
        factory: Arc<dyn EventFactory>,
        amm: Arc<dyn MarketAmm>,
        user: Option<Address>,
    ) -> Self {
        Self { factory, amm, user }
    }

    /// Event record, failing for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnknownMarket`] when the factory has no such event.
    pub async fn event(&self, id: MarketId) -> Result<EventInfo> {
        let event = self.factory.get_event(id).await?;
        if !event.exists() {
            return Err(ChainError::UnknownMarket {
                market_id: id.to_string(),
            }
            .into());
        }
        Ok(event)
    }

    async fn amm_address(&self, id: MarketId) -> Result<Address> {
        self.event(id).await?.amm().ok_or_else(|| {
            ChainError::NoAmm {
                market_id: id.to_string(),
            }
            .into()
        })
    }

    /// Event, reserves and (when a wallet is configured) the user's position.
    ///
    /// # Errors
    ///
    /// Returns an error if the market is unknown or a contract read fails.
    pub async fn snapshot(&self, id: MarketId) -> Result<MarketSnapshot> {
        let event = self.event(id).await?;
        let amm = event.amm().ok_or_else(|| ChainError::NoAmm {
            market_id: id.to_string(),
        })?;

        let reserves = self.amm.market_data(amm).await?;
        let position = match self.user {
            Some(user) => Some(self.amm.user_position(amm, user).await?),
            None => None,
        };

        Ok(MarketSnapshot {
            event,
            reserves,
            position,
        })
    }

    /// Client-side estimate; no contract call.
    #[must_use]
    pub fn quote(_side: TradeSide, amount: Decimal) -> TradeQuote {
        TradeQuote::estimate(to_base_units(amount))
    }

    /// Buy outcome tokens, accepting any output amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the market has no AMM or the transaction fails.
    pub async fn buy(&self, id: MarketId, side: TradeSide, amount: Decimal) -> Result<TxReceipt> {
        let amm = self.amm_address(id).await?;
        let amount_in = to_base_units(amount);
        info!(market_id = %id, side = %side, amount = %amount, "Buying outcome tokens");
        self.amm.buy(amm, side, amount_in, U256::ZERO).await
    }

    /// # Errors
    ///
    /// Returns an error if the market has no AMM or the transaction fails.
    pub async fn provide_liquidity(&self, id: MarketId, amount: Decimal) -> Result<TxReceipt> {
        let amm = self.amm_address(id).await?;
        info!(market_id = %id, amount = %amount, "Providing liquidity");
        self.amm.provide_liquidity(amm, to_base_units(amount)).await
    }

    /// AMM address of a market, the spender for trade approvals.
    ///
    /// # Errors
    ///
    /// Returns an error if the market is unknown or has no AMM.
    pub async fn spender(&self, id: MarketId) -> Result<Address> {
        self.amm_address(id).await
    }
}
