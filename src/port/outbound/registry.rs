//! Local record of markets created from this client.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::id::MarketId;
use crate::error::Result;

/// A market created by the local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedMarket {
    pub id: MarketId,
    pub amm_address: Option<Address>,
    pub title: String,
    pub category: String,
    pub creator: Address,
    pub created_at: DateTime<Utc>,
}

/// Storage for created markets.
pub trait MarketRegistry: Send + Sync {
    /// Insert or replace a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn record(&self, market: &CreatedMarket) -> Result<()>;

    /// All records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list(&self) -> Result<Vec<CreatedMarket>>;

    /// A single record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, id: &MarketId) -> Result<Option<CreatedMarket>>;
}
