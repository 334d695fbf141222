//! Local JSON fixtures, the last provider in each fallback chain.
//!
//! Sports file: `{"games": [Game, ...]}`. Crypto file: `{"assets": [CryptoAsset, ...]}`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::domain::crypto::CryptoAsset;
use crate::domain::sports::{DateRange, Game, League};
use crate::error::{ProviderError, Result};
use crate::port::outbound::crypto::CryptoProvider;
use crate::port::outbound::sports::SportsProvider;

#[derive(Debug, Default, Deserialize)]
struct SportsFixtures {
    #[serde(default)]
    games: Vec<Game>,
}

#[derive(Debug, Default, Deserialize)]
struct CryptoFixtures {
    #[serde(default)]
    assets: Vec<CryptoAsset>,
}

async fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let fixture_err = |reason: String| ProviderError::Fixture {
        path: path.display().to_string(),
        reason,
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| fixture_err(e.to_string()))?;
    debug!(path = %path.display(), bytes = raw.len(), "Loaded fixture file");
    Ok(serde_json::from_str(&raw).map_err(|e| fixture_err(e.to_string()))?)
}

/// Games read from a local file, filtered by league and range.
pub struct FixtureSportsProvider {
    path: PathBuf,
}

impl FixtureSportsProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SportsProvider for FixtureSportsProvider {
    fn name(&self) -> &'static str {
        "fixtures"
    }

    async fn upcoming_games(&self, league: League, range: &DateRange) -> Result<Vec<Game>> {
        let fixtures: SportsFixtures = load(&self.path).await?;
        let mut games: Vec<Game> = fixtures
            .games
            .into_iter()
            .filter(|g| g.league == league && range.contains(g.starts_at))
            .collect();
        games.sort_by_key(|g| g.starts_at);
        Ok(games)
    }
}

/// Assets read from a local file.
pub struct FixtureCryptoProvider {
    path: PathBuf,
}

impl FixtureCryptoProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CryptoProvider for FixtureCryptoProvider {
    fn name(&self) -> &'static str {
        "fixtures"
    }

    async fn top_assets(&self) -> Result<Vec<CryptoAsset>> {
        let fixtures: CryptoFixtures = load(&self.path).await?;
        Ok(fixtures.assets)
    }
}
