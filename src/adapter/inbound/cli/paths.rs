//! Path utilities for horizon.
//!
//! All local state lives under `~/.horizon/`:
//! - `~/.horizon/config.toml` - main configuration
//! - `~/.horizon/horizon.db` - created-markets registry
//! - `~/.horizon/fixtures/` - fallback data files

use std::path::PathBuf;

/// Returns the horizon home directory (`~/.horizon/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".horizon")
}

/// Returns the default config file path (`~/.horizon/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default registry database path (`~/.horizon/horizon.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("horizon.db")
}

/// Returns the fallback data directory (`~/.horizon/fixtures/`).
pub fn fixtures_dir() -> PathBuf {
    home_dir().join("fixtures")
}
