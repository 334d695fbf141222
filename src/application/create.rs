//! Market creation: bond accounting, approval and the `createEvent` call.
//!
//! Every precondition (valid parameters, no duplicate, sufficient
//! allowance) is checked before a transaction is sent.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::application::dedup::{check_duplicate, market_hash, validate_market_params};
use crate::domain::id::MarketId;
use crate::domain::market::{MarketParams, PartialMarketParams};
use crate::domain::money::{checked_sum, from_base_units, to_base_units};
use crate::error::{ChainError, CreateError, Result};
use crate::port::outbound::chain::{
    CreateEventRequest, EventFactory, FeeSchedule, TxReceipt, UsdcToken,
};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::registry::{CreatedMarket, MarketRegistry};

/// Allowances above this many base units (10^27) are treated as bogus reads.
#[must_use]
pub fn max_sane_allowance() -> U256 {
    U256::from(10u64).pow(U256::from(27u64))
}

/// USDC needed to create a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredAmounts {
    pub create_bond: Decimal,
    pub liquidity: Decimal,
    pub total: Decimal,
}

/// Result of a successful `createEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedMarketReceipt {
    pub market_id: MarketId,
    pub tx_hash: String,
    pub amm_address: Option<Address>,
}

pub struct CreateMarketService {
    factory: Arc<dyn EventFactory>,
    fees: Arc<dyn FeeSchedule>,
    usdc: Arc<dyn UsdcToken>,
    registry: Arc<dyn MarketRegistry>,
    clock: Arc<dyn Clock>,
    creator: Option<Address>,
}

impl CreateMarketService {
    pub fn new(
        factory: Arc<dyn EventFactory>,
        fees: Arc<dyn FeeSchedule>,
        usdc: Arc<dyn UsdcToken>,
        registry: Arc<dyn MarketRegistry>,
        clock: Arc<dyn Clock>,
        creator: Option<Address>,
    ) -> Self {
        Self {
            factory,
            fees,
            usdc,
            registry,
            clock,
            creator,
        }
    }

    fn creator(&self) -> Result<Address> {
        self.creator
            .ok_or_else(|| ChainError::WalletNotConfigured.into())
    }

    /// Create bond (read from the fee config) plus initial liquidity.
    ///
    /// # Errors
    ///
    /// Returns an error if the fee config cannot be read or the total
    /// overflows.
    pub async fn required_amounts(&self, liquidity: Decimal) -> Result<RequiredAmounts> {
        let create_bond = from_base_units(self.fees.create_bond().await?);
        Ok(RequiredAmounts {
            create_bond,
            liquidity,
            total: checked_sum(create_bond, liquidity)?,
        })
    }

    /// An allowance covers `required` only when it is non-zero, not
    /// implausibly large, and at least `required`.
    #[must_use]
    pub fn allowance_sufficient(allowance: U256, required: U256) -> bool {
        !allowance.is_zero() && allowance <= max_sane_allowance() && allowance >= required
    }

    /// Current allowance granted to the event factory.
    ///
    /// # Errors
    ///
    /// Returns an error if no wallet is configured or the read fails.
    pub async fn factory_allowance(&self) -> Result<U256> {
        self.usdc
            .allowance(self.creator()?, self.factory.address())
            .await
    }

    /// Approve the event factory for exactly `total` dollars.
    ///
    /// # Errors
    ///
    /// Returns an error if no wallet is configured or the transaction fails.
    pub async fn approve(&self, total: Decimal) -> Result<TxReceipt> {
        self.creator()?;
        info!(amount = %total, "Approving event factory");
        self.usdc
            .approve(self.factory.address(), to_base_units(total))
            .await
    }

    /// Validate, check for duplicates and allowance, then send `createEvent`.
    /// The new market is recorded in the local registry.
    ///
    /// # Errors
    ///
    /// Returns a [`CreateError`] for failed preconditions, or a chain error
    /// if the transaction fails.
    pub async fn create(
        &self,
        params: &MarketParams,
        liquidity: Decimal,
    ) -> Result<CreatedMarketReceipt> {
        let creator = self.creator()?;

        validate_market_params(&PartialMarketParams::from(params.clone()), self.clock.now())
            .map_err(|errors| CreateError::InvalidParams { errors })?;

        let duplicate = check_duplicate(self.factory.as_ref(), params).await?;
        if duplicate.is_duplicate {
            return Err(CreateError::Duplicate {
                market_id: duplicate.market_id.to_string(),
            }
            .into());
        }

        let required = self.required_amounts(liquidity).await?;
        let allowance = self.factory_allowance().await?;
        if !Self::allowance_sufficient(allowance, to_base_units(required.total)) {
            return Err(CreateError::AllowanceTooLow {
                allowance: from_base_units(allowance),
                required: required.total,
            }
            .into());
        }

        let request = CreateEventRequest {
            category: params.category.clone(),
            title: params.title.clone(),
            description: params.rules.clone(),
            resolve_at: u64::try_from(params.resolve_at).unwrap_or_default(),
            primary_source: params.primary_source.clone(),
            rule_bytes: params.rules.as_bytes().to_vec(),
            initial_liquidity: to_base_units(liquidity),
        };
        let receipt = self.factory.create_event(&request).await?;
        let market_id = market_hash(params);
        info!(market_id = %market_id, tx_hash = %receipt.tx_hash, "Market created");

        let amm_address = match self.factory.get_event(market_id).await {
            Ok(event) => event.amm(),
            Err(e) => {
                warn!(market_id = %market_id, error = %e, "Could not read new market");
                None
            }
        };

        self.registry.record(&CreatedMarket {
            id: market_id,
            amm_address,
            title: params.title.clone(),
            category: params.category.clone(),
            creator,
            created_at: self.clock.now(),
        })?;

        Ok(CreatedMarketReceipt {
            market_id,
            tx_hash: receipt.tx_hash,
            amm_address,
        })
    }

    /// Markets recorded locally, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    pub fn created_markets(&self) -> Result<Vec<CreatedMarket>> {
        self.registry.list()
    }

    /// Events the factory attributes to the configured wallet.
    ///
    /// # Errors
    ///
    /// Returns an error if no wallet is configured or the read fails.
    pub async fn onchain_markets(&self) -> Result<Vec<MarketId>> {
        self.factory.creator_events(self.creator()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_allowance_is_never_sufficient() {
        assert!(!CreateMarketService::allowance_sufficient(U256::ZERO, U256::ZERO));
    }

    #[test]
    fn allowance_must_cover_required() {
        let required = U256::from(510_000_000u64);
        assert!(!CreateMarketService::allowance_sufficient(
            U256::from(509_999_999u64),
            required
        ));
        assert!(CreateMarketService::allowance_sufficient(required, required));
    }

    #[test]
    fn implausible_allowance_is_rejected() {
        let required = U256::from(1u64);
        assert!(CreateMarketService::allowance_sufficient(max_sane_allowance(), required));
        assert!(!CreateMarketService::allowance_sufficient(U256::MAX, required));
    }
}
