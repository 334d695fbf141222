//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Secrets come from the
//! environment only: `WALLET_PRIVATE_KEY` and `PINATA_JWT`.
//!
//! # Example
//!
//! ```no_run
//! use horizon::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::chain::ChainConfig;
use super::data::{DataConfig, MAX_CACHE_TTL_SECS, MAX_LEAD_HOURS, MAX_QUERY_DAYS};
use super::ipfs::IpfsConfig;
use super::logging::LoggingConfig;
use super::wallet::WalletConfig;
use crate::adapter::inbound::cli::paths;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub chain: ChainConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub ipfs: IpfsConfig,

    #[serde(default)]
    pub wallet: WalletConfig,

    /// Path to the SQLite database holding the created-markets registry.
    #[serde(default = "default_database_path")]
    pub database: String,
}

/// `~/.horizon/horizon.db`.
fn default_database_path() -> String {
    paths::default_database().display().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            chain: ChainConfig::default(),
            data: DataConfig::default(),
            ipfs: IpfsConfig::default(),
            wallet: WalletConfig::default(),
            database: default_database_path(),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn check_url(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    Ok(())
}

impl Config {
    /// Parse configuration from TOML content and load secrets from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Secrets never come from the config file
        config.wallet.private_key = non_empty_env("WALLET_PRIVATE_KEY");
        config.ipfs.jwt = non_empty_env("PINATA_JWT");

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` when it exists, otherwise defaults plus environment secrets.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first invalid or missing field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }

        check_url("chain.rpc_url", &self.chain.rpc_url)?;
        check_url("chain.explorer_url", &self.chain.explorer_url)?;
        if self.chain.chain_id == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chain.chain_id",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        check_url("data.espn_url", &self.data.espn_url)?;
        check_url("data.nba_url", &self.data.nba_url)?;
        check_url("data.coingecko_url", &self.data.coingecko_url)?;
        if self.data.cache_ttl_secs == 0 || self.data.cache_ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(ConfigError::InvalidValue {
                field: "data.cache_ttl_secs",
                reason: format!("must be between 1 and {MAX_CACHE_TTL_SECS}"),
            }
            .into());
        }
        if !(0..=MAX_LEAD_HOURS).contains(&self.data.min_lead_hours) {
            return Err(ConfigError::InvalidValue {
                field: "data.min_lead_hours",
                reason: format!("must be between 0 and {MAX_LEAD_HOURS}"),
            }
            .into());
        }
        if !(1..=MAX_QUERY_DAYS).contains(&self.data.max_query_days) {
            return Err(ConfigError::InvalidValue {
                field: "data.max_query_days",
                reason: format!("must be between 1 and {MAX_QUERY_DAYS}"),
            }
            .into());
        }
        if self.data.default_query_days <= 0
            || self.data.default_query_days > self.data.max_query_days
        {
            return Err(ConfigError::InvalidValue {
                field: "data.default_query_days",
                reason: "must be between 1 and data.max_query_days".to_string(),
            }
            .into());
        }

        check_url("ipfs.api_url", &self.ipfs.api_url)?;
        check_url("ipfs.gateway_url", &self.ipfs.gateway_url)?;

        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        Ok(())
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
