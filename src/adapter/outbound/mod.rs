//! Outbound adapters (driven side).

#[cfg(feature = "chain")]
pub mod chain;
pub mod coingecko;
pub mod espn;
pub mod fixtures;
pub mod http;
pub mod nba;
pub mod pinata;
pub mod sqlite;
