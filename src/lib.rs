//! Horizon - prediction market client.
//!
//! Builds market parameters from sports schedules and crypto prices,
//! detects duplicates with the event factory's content hash, and drives
//! trading and resolution through the on-chain contracts.
//!
//! # Architecture
//!
//! - [`domain`] - Markets, games, assets, evidence. No I/O.
//! - [`port`] - Traits for providers, contracts, storage and time.
//! - [`application`] - Use cases: dedup, templates, catalogs with cache
//!   and provider fallback, market creation, trading, resolution.
//! - [`adapter`] - ESPN, NBA stats, CoinGecko, fixtures, Pinata, SQLite,
//!   alloy contracts (`chain` feature) and the CLI.
//! - [`infrastructure`] - Configuration and wiring.
//!
//! # Features
//!
//! - `chain` (default) - Contract reads and transactions via alloy.
//! - `testkit` - In-memory fakes for tests.
//!
//! # Example
//!
//! ```
//! use horizon::application::dedup::market_hash;
//! use horizon::domain::MarketParams;
//!
//! let id = market_hash(&MarketParams {
//!     category: "Crypto".into(),
//!     title: "Will BTC price reach ≥ $100,000 by January 31, 2025?".into(),
//!     resolve_at: 1_738_367_999,
//!     primary_source: "https://www.coingecko.com/en/coins/bitcoin".into(),
//!     rules: "Resolves YES if the price reaches the target.".into(),
//! });
//! assert_eq!(id.to_string().len(), 66);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
