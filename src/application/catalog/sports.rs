//! Upcoming games with provider fallback and caching.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::cache::DataCache;
use crate::application::fallback::{first_non_empty, first_ok};
use crate::application::template::{resolution_window, resolve_game, GameResolution, ResolutionWindow};
use crate::domain::error::DomainError;
use crate::domain::sports::{DateRange, Game, GameStatus, GameTimeInfo, League, RangePreset};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::sports::SportsProvider;

/// Query windows and lead-time policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SportsSettings {
    pub default_query_days: i64,
    pub max_query_days: i64,
    pub min_lead_hours: i64,
}

impl Default for SportsSettings {
    fn default() -> Self {
        Self {
            default_query_days: 10,
            max_query_days: 30,
            min_lead_hours: 2,
        }
    }
}

/// Everything needed to decide whether a game market can be reported.
#[derive(Debug, Clone, Serialize)]
pub struct GameResolutionInfo {
    pub window: ResolutionWindow,
    pub status: Option<GameStatus>,
    pub resolution: Option<GameResolution>,
}

/// Game listings backed by an ordered provider chain.
pub struct SportsCatalog {
    providers: Vec<Arc<dyn SportsProvider>>,
    cache: Arc<DataCache>,
    clock: Arc<dyn Clock>,
    settings: SportsSettings,
}

impl SportsCatalog {
    pub fn new(
        providers: Vec<Arc<dyn SportsProvider>>,
        cache: Arc<DataCache>,
        clock: Arc<dyn Clock>,
        settings: SportsSettings,
    ) -> Self {
        Self {
            providers,
            cache,
            clock,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> SportsSettings {
        self.settings
    }

    /// `sports_{LEAGUE}_{startHour}_{endHour}`, hours since the epoch.
    #[must_use]
    pub fn cache_key(league: League, range: &DateRange) -> String {
        const HOUR_MS: i64 = 60 * 60 * 1000;
        format!(
            "sports_{}_{}_{}",
            league,
            range.start.timestamp_millis().div_euclid(HOUR_MS),
            range.end.timestamp_millis().div_euclid(HOUR_MS),
        )
    }

    #[must_use]
    pub fn default_range(&self) -> DateRange {
        DateRange::upcoming(self.clock.now(), self.settings.default_query_days)
    }

    #[must_use]
    pub fn preset(&self, preset: RangePreset) -> DateRange {
        DateRange::preset(preset, self.clock.now(), self.settings.default_query_days)
    }

    /// # Errors
    ///
    /// Returns an error for inverted ranges or ranges over the configured maximum.
    pub fn validate_range(&self, range: &DateRange) -> Result<(), DomainError> {
        range.validate(self.settings.max_query_days)
    }

    /// Games for `league` in `range` (default: the next configured days).
    ///
    /// Never fails: when every provider errors or returns nothing, the
    /// result is empty. Only non-empty results are cached.
    pub async fn upcoming_games(&self, league: League, range: Option<DateRange>) -> Vec<Game> {
        let range = range.unwrap_or_else(|| self.default_range());
        let key = Self::cache_key(league, &range);

        if let Some(games) = self.cache.get::<Vec<Game>>(&key) {
            debug!(league = %league, count = games.len(), "Games served from cache");
            return games;
        }

        let games = first_non_empty(&self.providers, |provider| {
            let provider = Arc::clone(provider);
            async move { provider.upcoming_games(league, &range).await }
        })
        .await;

        if games.is_empty() {
            warn!(league = %league, "All sports providers failed");
        } else {
            info!(league = %league, count = games.len(), "Fetched upcoming games");
            self.cache.set(key, games.clone());
        }
        games
    }

    /// Clear the whole cache and fetch the default range again.
    pub async fn force_refresh(&self, league: League) -> Vec<Game> {
        self.cache.clear();
        self.upcoming_games(league, None).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Live status from the first provider that supports it.
    pub async fn game_status(&self, game: &Game) -> Option<GameStatus> {
        first_ok(&self.providers, |provider| {
            let provider = Arc::clone(provider);
            let game = game.clone();
            async move { provider.game_status(&game).await }
        })
        .await
        .flatten()
    }

    /// Window, live status and verdict for a game.
    pub async fn resolution_info(&self, game: &Game) -> GameResolutionInfo {
        let window = resolution_window(game, self.clock.now());
        let status = self.game_status(game).await;
        let resolution = status.as_ref().map(|s| resolve_game(s, game));
        GameResolutionInfo {
            window,
            status,
            resolution,
        }
    }

    #[must_use]
    pub fn time_info(&self, game: &Game) -> GameTimeInfo {
        GameTimeInfo::for_game(game, self.clock.now(), self.settings.min_lead_hours)
    }

    /// Too close to start to open a market.
    #[must_use]
    pub fn is_game_too_soon(&self, game: &Game) -> bool {
        self.time_info(game).is_too_soon
    }
}
