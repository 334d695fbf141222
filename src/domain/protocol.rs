//! Protocol constants mirrored from the deployed contracts.
//!
//! Bond amounts and fees are authoritative on-chain; these values are
//! used for display and for estimates before the contract is queried.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Trade fee in basis points (0.3%).
pub const TRADE_FEE_BPS: u32 = 30;

/// Settlement fee in basis points (1.0%).
pub const SETTLEMENT_FEE_BPS: u32 = 100;

/// Bond required to create a market.
pub const CREATE_BOND: Decimal = dec!(10);

/// Bond required to report an outcome.
pub const REPORT_BOND: Decimal = dec!(25);

/// Minimum bond for disputing a report.
pub const MIN_DISPUTE_BOND: Decimal = dec!(25);

/// Window after creation during which the create bond is refundable.
pub const CREATE_BOND_REFUND_WINDOW_SECS: u64 = 24 * 60 * 60;

/// Window after a report during which it can be disputed.
pub const DISPUTE_WINDOW_SECS: u64 = 24 * 60 * 60;

/// Suggested initial liquidity for a new market.
pub const DEFAULT_MARKET_LIQUIDITY: Decimal = dec!(500);

/// Largest evidence file accepted for upload.
pub const MAX_EVIDENCE_SIZE: u64 = 1024 * 1024;

/// Minimum lead time between now and a market's resolve time.
pub const MIN_RESOLVE_LEAD_SECS: i64 = 60 * 60;
