//! Market parameters and read-only snapshots of on-chain market state.
//!
//! Everything here mirrors contract data; the chain owns and mutates it.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::id::MarketId;
use super::money::BASIS_POINTS_DIVISOR;

/// Market categories offered when creating a market.
pub const CATEGORIES: [&str; 8] = [
    "Sports",
    "Crypto",
    "Politics",
    "Economics",
    "Technology",
    "Weather",
    "Entertainment",
    "Other",
];

/// The fields that identify a market and feed its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketParams {
    pub category: String,
    pub title: String,
    /// Unix timestamp (seconds) at which the market becomes resolvable.
    pub resolve_at: i64,
    pub primary_source: String,
    pub rules: String,
}

/// Partially filled market parameters, as collected by a creation flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialMarketParams {
    pub category: Option<String>,
    pub title: Option<String>,
    pub resolve_at: Option<i64>,
    pub primary_source: Option<String>,
    pub rules: Option<String>,
}

impl PartialMarketParams {
    /// Overlay every field set in `updates` onto `self`.
    pub fn merge(&mut self, updates: PartialMarketParams) {
        if updates.category.is_some() {
            self.category = updates.category;
        }
        if updates.title.is_some() {
            self.title = updates.title;
        }
        if updates.resolve_at.is_some() {
            self.resolve_at = updates.resolve_at;
        }
        if updates.primary_source.is_some() {
            self.primary_source = updates.primary_source;
        }
        if updates.rules.is_some() {
            self.rules = updates.rules;
        }
    }

    /// Returns the complete parameters when every field is present.
    #[must_use]
    pub fn complete(&self) -> Option<MarketParams> {
        Some(MarketParams {
            category: self.category.clone()?,
            title: self.title.clone()?,
            resolve_at: self.resolve_at?,
            primary_source: self.primary_source.clone()?,
            rules: self.rules.clone()?,
        })
    }
}

impl From<MarketParams> for PartialMarketParams {
    fn from(p: MarketParams) -> Self {
        Self {
            category: Some(p.category),
            title: Some(p.title),
            resolve_at: Some(p.resolve_at),
            primary_source: Some(p.primary_source),
            rules: Some(p.rules),
        }
    }
}

/// Event record as returned by the event factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventInfo {
    pub market_id: MarketId,
    pub creator: Address,
    pub amm_address: Address,
    pub created_at: u64,
    pub resolve_at: u64,
    pub category: String,
    pub title: String,
    pub description: String,
    pub primary_source: String,
    pub rule_bytes: Vec<u8>,
    pub create_bond_amount: U256,
    pub bond_refunded: bool,
    pub finalized: bool,
}

impl EventInfo {
    /// The factory returns a zeroed record for unknown ids.
    #[must_use]
    pub fn exists(&self) -> bool {
        !self.creator.is_zero()
    }

    /// AMM address, if one has been deployed.
    #[must_use]
    pub fn amm(&self) -> Option<Address> {
        (!self.amm_address.is_zero()).then_some(self.amm_address)
    }
}

/// AMM aggregates, all in USDC base units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarketReserves {
    pub yes_reserve: U256,
    pub no_reserve: U256,
    pub liquidity_usd: U256,
    pub volume_usd: U256,
    pub total_lp_supply: U256,
}

impl MarketReserves {
    /// YES probability in basis points implied by the reserves.
    ///
    /// Empty reserves read as an even 50%.
    #[must_use]
    pub fn yes_probability_bps(&self) -> u32 {
        let total = self.yes_reserve.saturating_add(self.no_reserve);
        if total.is_zero() {
            return BASIS_POINTS_DIVISOR / 2;
        }
        let scaled = self.yes_reserve.saturating_mul(U256::from(BASIS_POINTS_DIVISOR)) / total;
        u32::try_from(scaled).unwrap_or(BASIS_POINTS_DIVISOR)
    }
}

/// A user's holdings in one AMM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserPosition {
    pub yes_tokens: U256,
    pub no_tokens: U256,
    pub lp_tokens: U256,
}

/// Combined view of a market for display.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSnapshot {
    pub event: EventInfo,
    pub reserves: MarketReserves,
    pub position: Option<UserPosition>,
}

impl MarketSnapshot {
    #[must_use]
    pub fn yes_probability_bps(&self) -> u32 {
        self.reserves.yes_probability_bps()
    }

    /// Implied price of one `side` token, between 0 and 1.
    #[must_use]
    pub fn side_price(&self, side: TradeSide) -> f64 {
        let yes = f64::from(self.yes_probability_bps()) / f64::from(BASIS_POINTS_DIVISOR);
        match side {
            TradeSide::Yes => yes,
            TradeSide::No => 1.0 - yes,
        }
    }

    /// The user's share of LP supply as a percentage.
    #[must_use]
    pub fn user_lp_share(&self) -> f64 {
        let Some(position) = self.position else {
            return 0.0;
        };
        if self.reserves.total_lp_supply.is_zero() {
            return 0.0;
        }
        let lp = u128::try_from(position.lp_tokens).unwrap_or(u128::MAX) as f64;
        let supply = u128::try_from(self.reserves.total_lp_supply).unwrap_or(u128::MAX) as f64;
        lp / supply * 100.0
    }
}

/// Which outcome token to buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Yes,
    No,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
        }
    }
}

/// Client-side trade estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TradeQuote {
    pub tokens_out: U256,
    pub fee: U256,
}

impl TradeQuote {
    /// Rough quote without a contract call: one token per base unit in,
    /// with a flat 1% fee estimate.
    #[must_use]
    pub fn estimate(amount_in: U256) -> Self {
        Self {
            tokens_out: amount_in,
            fee: amount_in / U256::from(100u64),
        }
    }
}
