//! Sports and crypto data source configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ESPN_URL: &str = "https://site.api.espn.com/apis/site/v2/sports";
pub const DEFAULT_NBA_URL: &str = "https://stats.nba.com/stats";
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

/// One year.
pub const MAX_CACHE_TTL_SECS: u64 = 31_536_000;
/// Ten years.
pub const MAX_QUERY_DAYS: i64 = 3_650;
pub const MAX_LEAD_HOURS: i64 = 24 * MAX_QUERY_DAYS;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub espn_url: String,
    pub nba_url: String,
    pub coingecko_url: String,
    /// Local games file used when every live source fails.
    pub sports_fixtures: Option<PathBuf>,
    /// Local asset listing used when CoinGecko fails.
    pub crypto_fixtures: Option<PathBuf>,
    pub cache_ttl_secs: u64,
    pub min_lead_hours: i64,
    pub default_query_days: i64,
    pub max_query_days: i64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            espn_url: DEFAULT_ESPN_URL.into(),
            nba_url: DEFAULT_NBA_URL.into(),
            coingecko_url: DEFAULT_COINGECKO_URL.into(),
            sports_fixtures: None,
            crypto_fixtures: None,
            cache_ttl_secs: 600,
            min_lead_hours: 2,
            default_query_days: 10,
            max_query_days: 30,
        }
    }
}
