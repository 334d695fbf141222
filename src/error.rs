use thiserror::Error;

pub use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures talking to a third-party data source (ESPN, CoinGecko, IPFS).
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} returned HTTP {status}")]
    Status {
        provider: &'static str,
        status: u16,
    },

    #[error("{provider} response could not be decoded: {reason}")]
    Decode {
        provider: &'static str,
        reason: String,
    },

    #[error("{provider} does not support {what}")]
    Unsupported {
        provider: &'static str,
        what: String,
    },

    #[error("failed to read fixture {path}: {reason}")]
    Fixture { path: String, reason: String },
}

/// Contract interaction errors.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("wallet not configured")]
    WalletNotConfigured,

    #[error("contract call {call} failed: {reason}")]
    CallFailed { call: &'static str, reason: String },

    #[error("failed to send {call}: {reason}")]
    SendFailed { call: &'static str, reason: String },

    #[error("failed to get receipt for {call}: {reason}")]
    ReceiptFailed { call: &'static str, reason: String },

    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },

    #[error("market {market_id} has no AMM")]
    NoAmm { market_id: String },

    #[error("market {market_id} does not exist")]
    UnknownMarket { market_id: String },
}

/// Market creation preconditions checked before any transaction is sent.
#[derive(Error, Debug)]
pub enum CreateError {
    #[error("invalid parameters: {}", .errors.join(", "))]
    InvalidParams { errors: Vec<String> },

    #[error("a market with these parameters already exists: {market_id}")]
    Duplicate { market_id: String },

    #[error("USDC spending not approved (allowance {allowance}, required {required})")]
    AllowanceTooLow {
        allowance: rust_decimal::Decimal,
        required: rust_decimal::Decimal,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Create(#[from] CreateError),

    #[error("evidence error: {0}")]
    Evidence(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0} not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
