//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`] - A manually advanced clock.
//! - [`provider`] - Scripted sports and crypto providers that count calls.
//! - [`chain`] - An in-memory stand-in for every contract port.
//! - [`store`] - In-memory evidence store and market registry.
//! - [`domain`] - Builders for games, assets and market parameters.

pub mod chain;
pub mod clock;
pub mod domain;
pub mod provider;
pub mod store;
