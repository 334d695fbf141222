//! NBA stats schedule API. NBA only.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use reqwest::header::USER_AGENT;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::adapter::outbound::http;
use crate::domain::id::GameId;
use crate::domain::sports::{DateRange, Game, League};
use crate::error::{ProviderError, Result};
use crate::port::outbound::sports::SportsProvider;

const PROVIDER: &str = "nba-stats";

/// stats.nba.com rejects non-browser agents.
const BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleResponse {
    #[serde(default)]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultSet {
    headers: Vec<String>,
    #[serde(default)]
    row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

pub struct NbaStatsClient {
    http: HttpClient,
    base_url: String,
}

impl NbaStatsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: http::client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Season label such as `2024-25`. Seasons roll over in October.
#[must_use]
pub fn season_label(at: DateTime<Utc>) -> String {
    let end_year = if at.month() >= 10 { at.year() + 1 } else { at.year() };
    format!("{}-{:02}", end_year - 1, end_year.rem_euclid(100))
}

fn parse_game_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

fn text(row: &[Value], idx: usize) -> Option<String> {
    match row.get(idx)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_games(set: &ResultSet, range: &DateRange) -> Vec<Game> {
    let (Some(date_idx), Some(home_idx), Some(away_idx), Some(id_idx)) = (
        set.column("GAME_DATE_EST"),
        set.column("HOME_TEAM_NAME"),
        set.column("VISITOR_TEAM_NAME"),
        set.column("GAME_ID"),
    ) else {
        return Vec::new();
    };

    let mut games: Vec<Game> = set
        .row_set
        .iter()
        .filter_map(|row| {
            let starts_at = parse_game_date(&text(row, date_idx)?)?;
            let id = text(row, id_idx)?;
            Some(Game {
                id: GameId::new(format!("nba_{id}")),
                league: League::Nba,
                starts_at,
                home: text(row, home_idx)?,
                away: text(row, away_idx)?,
                venue: None,
                source_url: Some(format!("https://www.nba.com/game/{id}")),
                allows_draw: false,
            })
        })
        .filter(|g| range.contains(g.starts_at))
        .collect();
    games.sort_by_key(|g| g.starts_at);
    games
}

#[async_trait]
impl SportsProvider for NbaStatsClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn upcoming_games(&self, league: League, range: &DateRange) -> Result<Vec<Game>> {
        if league != League::Nba {
            return Err(ProviderError::Unsupported {
                provider: PROVIDER,
                what: format!("league {league}"),
            }
            .into());
        }

        let url = format!(
            "{}/scheduleleaguev2?LeagueID=00&Season={}",
            self.base_url,
            season_label(range.start)
        );
        info!(url = %url, "Fetching NBA schedule");

        let response = self
            .http
            .get(&url)
            .header(USER_AGENT, BROWSER_AGENT)
            .send()
            .await?;
        let schedule: ScheduleResponse = http::decode(PROVIDER, response).await?;

        Ok(schedule
            .result_sets
            .first()
            .map(|set| to_games(set, range))
            .unwrap_or_default())
    }
}
