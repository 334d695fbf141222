//! ESPN site API client (public, no key).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client as HttpClient;
use tracing::{info, warn};

use super::dto::{Event, Scoreboard};
use crate::adapter::outbound::http;
use crate::domain::id::GameId;
use crate::domain::sports::{DateRange, Game, GameState, GameStatus, League};
use crate::error::Result;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::sports::SportsProvider;

const PROVIDER: &str = "espn";

/// Scoreboard-backed schedule and live status.
pub struct EspnClient {
    http: HttpClient,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl EspnClient {
    pub fn new(base_url: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            http: http::client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            clock,
        }
    }

    /// `{base}/{league path}/scoreboard?dates=YYYYMMDD-YYYYMMDD`
    #[must_use]
    pub fn scoreboard_url(&self, league: League, range: &DateRange) -> String {
        format!(
            "{}/{}/scoreboard?dates={}-{}",
            self.base_url,
            league.espn_path(),
            range.start.format("%Y%m%d"),
            range.end.format("%Y%m%d"),
        )
    }

    async fn scoreboard(&self, url: &str) -> Result<Vec<Event>> {
        info!(url = %url, "Fetching ESPN scoreboard");
        let board: Scoreboard = http::get_json(&self.http, PROVIDER, url).await?;
        Ok(board.events.unwrap_or_default())
    }
}

/// ESPN dates omit seconds (`2025-01-15T00:30Z`); accept both forms.
pub(crate) fn parse_espn_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
                .ok()
                .map(|dt| dt.and_utc())
        })
}

/// Map one scoreboard event to a game. `None` for malformed events.
pub(crate) fn to_game(league: League, event: &Event) -> Option<Game> {
    let starts_at = parse_espn_date(&event.date)?;
    let competition = event.competitions.first()?;
    let home = competition.side("home").and_then(|c| c.team_name());
    let away = competition.side("away").and_then(|c| c.team_name());

    Some(Game {
        id: GameId::new(format!("{}_{}", league.code(), event.id)),
        league,
        starts_at,
        home: home.unwrap_or("Home Team").to_string(),
        away: away.unwrap_or("Away Team").to_string(),
        venue: competition.venue.as_ref().and_then(|v| v.full_name.clone()),
        source_url: Some(format!(
            "https://www.espn.com/{}/game/_/gameId/{}",
            league.code(),
            event.id
        )),
        allows_draw: league.allows_draw(),
    })
}

#[async_trait]
impl SportsProvider for EspnClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn upcoming_games(&self, league: League, range: &DateRange) -> Result<Vec<Game>> {
        let events = self.scoreboard(&self.scoreboard_url(league, range)).await?;

        let mut games: Vec<Game> = events
            .iter()
            .filter_map(|event| {
                let game = to_game(league, event);
                if game.is_none() {
                    warn!(event_id = %event.id, "Skipping malformed ESPN event");
                }
                game
            })
            .filter(|game| range.contains(game.starts_at))
            .collect();
        games.sort_by_key(|g| g.starts_at);
        Ok(games)
    }

    async fn game_status(&self, game: &Game) -> Result<Option<GameStatus>> {
        let url = format!(
            "{}/{}/scoreboard?dates={}",
            self.base_url,
            game.league.espn_path(),
            game.starts_at.format("%Y%m%d"),
        );
        let events = self.scoreboard(&url).await?;

        let found = events.iter().find_map(|event| {
            let competition = event.competitions.first()?;
            let home = competition.side("home")?;
            let away = competition.side("away")?;
            let matches = home.team_name() == Some(game.home.as_str())
                && away.team_name() == Some(game.away.as_str());
            matches.then_some((competition, home, away))
        });

        let Some((competition, home, away)) = found else {
            return Ok(None);
        };

        let state = competition
            .status
            .as_ref()
            .map_or(GameState::Scheduled, |s| GameState::from_espn(&s.kind.name));
        let score = |raw: &Option<String>| raw.as_deref().and_then(|s| s.trim().parse().ok());

        Ok(Some(GameStatus {
            game_id: game.id.clone(),
            state,
            home_score: score(&home.score),
            away_score: score(&away.score),
            last_updated: self.clock.now(),
            source: "ESPN API".to_string(),
        }))
    }
}
