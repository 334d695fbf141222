//! Sports reference data: leagues, games, live status and date ranges.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::GameId;

/// Leagues with game templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum League {
    Nba,
    Nfl,
    Mls,
    Nhl,
}

impl League {
    pub const ALL: [League; 4] = [League::Nba, League::Nfl, League::Mls, League::Nhl];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nba => "NBA",
            Self::Nfl => "NFL",
            Self::Mls => "MLS",
            Self::Nhl => "NHL",
        }
    }

    /// Lowercase code used in ids and URLs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Nba => "nba",
            Self::Nfl => "nfl",
            Self::Mls => "mls",
            Self::Nhl => "nhl",
        }
    }

    /// ESPN site API path segment.
    #[must_use]
    pub const fn espn_path(&self) -> &'static str {
        match self {
            Self::Nba => "basketball/nba",
            Self::Nfl => "football/nfl",
            Self::Mls => "soccer/usa.1",
            Self::Nhl => "hockey/nhl",
        }
    }

    /// Whether a game can end level after regulation.
    #[must_use]
    pub const fn allows_draw(&self) -> bool {
        matches!(self, Self::Mls | Self::Nhl)
    }

    /// Target resolution delay after start, in minutes (3.5 h NBA, 4.5 h otherwise).
    #[must_use]
    pub const fn target_resolve_minutes(&self) -> i64 {
        match self {
            Self::Nba => 210,
            _ => 270,
        }
    }

    /// Hard resolution deadline after start, in hours.
    #[must_use]
    pub const fn max_resolve_hours(&self) -> i64 {
        match self {
            Self::Nba => 8,
            _ => 12,
        }
    }

    /// Human range shown in rules text for the target window.
    #[must_use]
    pub const fn target_hours_label(&self) -> &'static str {
        match self {
            Self::Nba => "3-4",
            _ => "4-5",
        }
    }

    /// Human value shown in rules text for the hard deadline.
    #[must_use]
    pub const fn max_hours_label(&self) -> &'static str {
        match self {
            Self::Nba => "8",
            _ => "12",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NBA" => Ok(Self::Nba),
            "NFL" => Ok(Self::Nfl),
            "MLS" => Ok(Self::Mls),
            "NHL" => Ok(Self::Nhl),
            _ => Err(DomainError::UnknownLeague(s.to_string())),
        }
    }
}

/// A scheduled game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub league: League,
    pub starts_at: DateTime<Utc>,
    pub home: String,
    pub away: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Box score or game page, e.g. on ESPN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub allows_draw: bool,
}

/// Live state of a game as reported by the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameState {
    Scheduled,
    InProgress,
    Final,
    Postponed,
    Cancelled,
}

impl GameState {
    /// Map an ESPN status type name; anything unrecognized is `Scheduled`.
    #[must_use]
    pub fn from_espn(name: &str) -> Self {
        match name {
            "STATUS_FINAL" => Self::Final,
            "STATUS_IN_PROGRESS" => Self::InProgress,
            "STATUS_POSTPONED" => Self::Postponed,
            "STATUS_CANCELLED" => Self::Cancelled,
            _ => Self::Scheduled,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Final => "final",
            Self::Postponed => "postponed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a game's status and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    pub game_id: GameId,
    pub state: GameState,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub last_updated: DateTime<Utc>,
    pub source: String,
}

/// Inclusive UTC time window for game queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Named ranges offered by the game picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Today,
    Tomorrow,
    Weekend,
    Next7Days,
    Next14Days,
    Default,
}

impl FromStr for RangePreset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "tomorrow" => Ok(Self::Tomorrow),
            "weekend" => Ok(Self::Weekend),
            "next7d" => Ok(Self::Next7Days),
            "next14d" => Ok(Self::Next14Days),
            "default" => Ok(Self::Default),
            other => Err(DomainError::InvalidDateRange {
                reason: format!("unknown range preset: {other}"),
            }),
        }
    }
}

impl DateRange {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `now` through `now + days`, clamped to the latest representable time.
    #[must_use]
    pub fn upcoming(now: DateTime<Utc>, days: i64) -> Self {
        let end = Duration::try_days(days)
            .and_then(|span| now.checked_add_signed(span))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::new(now, end)
    }

    /// Resolve a preset relative to `now`. Day boundaries are UTC.
    #[must_use]
    pub fn preset(preset: RangePreset, now: DateTime<Utc>, default_days: i64) -> Self {
        let day = Duration::days(1);
        let last_ms = Duration::milliseconds(1);
        let today = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map_or(now, |midnight| midnight.and_utc());
        let tomorrow = today + day;

        match preset {
            RangePreset::Today => Self::new(today, tomorrow - last_ms),
            RangePreset::Tomorrow => Self::new(tomorrow, tomorrow + day - last_ms),
            RangePreset::Weekend => {
                let days_until_saturday = (6 - i64::from(now.weekday().num_days_from_sunday())) % 7;
                let saturday = today + Duration::days(days_until_saturday);
                let sunday = saturday + day;
                Self::new(saturday, sunday + day - last_ms)
            }
            RangePreset::Next7Days => Self::upcoming(now, 7),
            RangePreset::Next14Days => Self::upcoming(now, 14),
            RangePreset::Default => Self::upcoming(now, default_days),
        }
    }

    /// # Errors
    ///
    /// Rejects inverted ranges and ranges longer than `max_days`.
    pub fn validate(&self, max_days: i64) -> Result<(), DomainError> {
        if self.start >= self.end {
            return Err(DomainError::InvalidDateRange {
                reason: "Start date must be before end date".into(),
            });
        }
        if Duration::try_days(max_days).is_some_and(|limit| self.end - self.start > limit) {
            return Err(DomainError::InvalidDateRange {
                reason: format!("Date range cannot exceed {max_days} days"),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

/// How far away a game is, relative to the minimum lead time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameTimeInfo {
    pub is_too_soon: bool,
    pub is_soon: bool,
    pub is_past: bool,
    pub hours_until_game: f64,
    pub min_lead_hours: i64,
}

impl GameTimeInfo {
    /// Games starting within six hours are "soon".
    const SOON_HOURS: f64 = 6.0;

    #[must_use]
    pub fn for_game(game: &Game, now: DateTime<Utc>, min_lead_hours: i64) -> Self {
        let hours = (game.starts_at - now).num_milliseconds() as f64 / 3_600_000.0;
        let lead = min_lead_hours as f64;
        Self {
            is_too_soon: hours < lead,
            is_soon: hours < Self::SOON_HOURS && hours >= lead,
            is_past: hours < 0.0,
            hours_until_game: hours.max(0.0),
            min_lead_hours,
        }
    }
}
