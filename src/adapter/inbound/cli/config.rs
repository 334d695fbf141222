//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use super::{load_config, output};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

fn configured(value: Option<impl std::fmt::Display>) -> String {
    value.map_or_else(|| output::muted("(not set)"), |v| v.to_string())
}

fn secret(present: bool) -> String {
    if present {
        output::positive("set")
    } else {
        output::muted("(not set)")
    }
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!(
        "1. Fill in [chain.contracts] in {}",
        path.display()
    ));
    output::note("2. Set WALLET_PRIVATE_KEY and PINATA_JWT in the environment");
    output::note(&format!(
        "3. Run: horizon config validate -c {}",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = load_config(path)?;

    if output::is_json() {
        output::json_output(&config);
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "File",
        if path.exists() {
            path.display().to_string()
        } else {
            output::muted("(defaults)")
        },
    );
    output::field("Database", &config.database);
    output::field(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );

    let chain = &config.chain;
    output::section("Chain");
    output::field("RPC", &chain.rpc_url);
    output::field("Chain ID", chain.chain_id);
    output::field("Explorer", &chain.explorer_url);
    output::field("USDC", configured(chain.contracts.usdc));
    output::field("Fee config", configured(chain.contracts.fee_config));
    output::field("Factory", configured(chain.contracts.event_factory));
    output::field("Resolution", configured(chain.contracts.resolution_manager));

    let data = &config.data;
    output::section("Data");
    output::field("ESPN", &data.espn_url);
    output::field("NBA", &data.nba_url);
    output::field("CoinGecko", &data.coingecko_url);
    output::field(
        "Sports file",
        configured(data.sports_fixtures.as_ref().map(|p| p.display())),
    );
    output::field(
        "Crypto file",
        configured(data.crypto_fixtures.as_ref().map(|p| p.display())),
    );
    output::field("Cache TTL", format!("{}s", data.cache_ttl_secs));
    output::field("Min lead", format!("{}h", data.min_lead_hours));
    output::field(
        "Query days",
        format!("{} (max {})", data.default_query_days, data.max_query_days),
    );

    output::section("Secrets");
    output::field("Wallet key", secret(config.wallet.private_key.is_some()));
    output::field("Watch address", configured(config.wallet.address));
    output::field("Pinata JWT", secret(config.ipfs.jwt.is_some()));
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: format!("{} does not exist (run `horizon config init`)", path.display()),
        }
        .into());
    }

    let config: Config = load_config(path)?;
    output::success(&format!("{} is valid", path.display()));

    if config.chain.contracts.require_all().is_err() {
        output::warning("Contract addresses are incomplete; chain commands are unavailable.");
    }
    if config.wallet.private_key.is_none() {
        output::note("WALLET_PRIVATE_KEY is not set; only read-only commands will work.");
    }
    if config.ipfs.jwt.is_none() {
        output::note("PINATA_JWT is not set; evidence uploads return mock URIs.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.chain.chain_id, 146);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        execute_init(&path, false).unwrap();
        assert!(execute_init(&path, false).is_err());
        execute_init(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn init_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/config.toml");
        execute_init(&path, false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn validate_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(execute_validate(&dir.path().join("missing.toml")).is_err());
    }
}
