//! Domain validation errors.
//!
//! Returned by parsing constructors and validators when an input violates
//! a domain rule. None of these involve I/O.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A USDC amount could not be parsed or was negative.
    #[error("invalid USDC amount: {input}")]
    InvalidAmount {
        /// The raw input that was rejected.
        input: String,
    },

    /// A market identifier was not a 32-byte hex string.
    #[error("invalid market id '{input}': {reason}")]
    InvalidMarketId { input: String, reason: String },

    /// League name not recognized.
    #[error("unknown league: {0}")]
    UnknownLeague(String),

    /// Raw resolution state outside the contract's enum.
    #[error("unknown resolution state: {0}")]
    UnknownResolutionState(u8),

    /// Evidence payload is missing required fields.
    #[error("invalid evidence: {reason}")]
    InvalidEvidence { reason: String },

    /// Date range is inverted or too wide.
    #[error("{reason}")]
    InvalidDateRange { reason: String },
}
