//! Game-winner market templates.
//!
//! All functions are pure: the same game always renders the same text.
//! Dates and times are rendered in UTC.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::sports::{Game, GameState, GameStatus};

/// `"{home} vs {away}: Who wins?"`
#[must_use]
pub fn sports_title(game: &Game) -> String {
    format!("{} vs {}: Who wins?", game.home, game.away)
}

fn game_link(game: &Game) -> &str {
    game.source_url.as_deref().unwrap_or("Official league schedule")
}

/// Full rules text for a game market. Leagues with draws get a
/// three-outcome variant resolved on the regulation-time result.
#[must_use]
pub fn sports_description(game: &Game) -> String {
    let date = game.starts_at.format("%A, %B %-d, %Y");
    let time = game.starts_at.format("%-I:%M %p UTC");
    let league = game.league;
    let target = league.target_hours_label();
    let max = league.max_hours_label();
    let link = game_link(game);

    if game.allows_draw {
        format!(
            "Match date/time: {date} at {time}\n\
             \n\
             Outcomes\n\
             - {home} (home win)\n\
             - Draw (after regulation)\n\
             - {away} (away win)\n\
             \n\
             Rules & Resolution Criteria\n\
             - Resolves only when ESPN or the official {league} source shows \"Final\"\n\
             - Target resolve window: {target} hours after kickoff/puck drop\n\
             - Hard deadline: {max} hours after start time\n\
             - Uses regulation-time result (pre-shootout if applicable)\n\
             - Accounts for delays and official reporting lag\n\
             - If postponed/cancelled, market may be voided\n\
             - Evidence required: screenshot of final score + recap link\n\
             \n\
             Game Link: {link}",
            home = game.home,
            away = game.away,
        )
    } else {
        format!(
            "Game date/time: {date} at {time}\n\
             \n\
             Outcomes (buttons use team names)\n\
             - {home} (home team wins; includes overtime if applicable)\n\
             - {away} (away team wins, or the game is cancelled/forfeited)\n\
             \n\
             Rules & Resolution Criteria\n\
             - Resolves only when ESPN or the official {league} source shows \"Final\"\n\
             - Target resolve window: {target} hours after tip-off\n\
             - Hard deadline: {max} hours after tip-off\n\
             - Includes overtime and accounts for delays\n\
             - Evidence required: screenshot of final score + recap link\n\
             \n\
             Game Link: {link}",
            home = game.home,
            away = game.away,
        )
    }
}

/// Target resolution time: start plus 3.5 h (NBA) or 4.5 h (others).
#[must_use]
pub fn sports_resolve_at(game: &Game) -> DateTime<Utc> {
    game.starts_at + Duration::minutes(game.league.target_resolve_minutes())
}

/// Hard deadline: start plus 8 h (NBA) or 12 h (others).
#[must_use]
pub fn sports_max_deadline(game: &Game) -> DateTime<Utc> {
    game.starts_at + Duration::hours(game.league.max_resolve_hours())
}

/// Short timing summary shown next to the template.
#[must_use]
pub fn sports_resolution_rules(game: &Game) -> String {
    format!(
        "Resolution timing:\n\
         • Target: {} hours after tip-off\n\
         • Hard deadline: {} hours after tip-off\n\
         • Only when official source shows \"Final\" status\n\
         • Accounts for OT, delays, and reporting lag",
        game.league.target_hours_label(),
        game.league.max_hours_label(),
    )
}

/// Reporter checklist for a game market.
#[must_use]
pub fn format_resolution_requirements(game: &Game) -> String {
    format!(
        "**Resolution Requirements:**\n\
         • Game must show \"Final\" status on ESPN\n\
         • Target resolution: {} hours after tip-off\n\
         • Hard deadline: {} hours after tip-off\n\
         • Includes overtime periods\n\
         • Accounts for delays and official reporting lag\n\
         • Evidence: Screenshot of ESPN final score + game recap link",
        game.league.target_hours_label(),
        game.league.max_hours_label(),
    )
}

/// When a game market may be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionWindow {
    pub target_time: DateTime<Utc>,
    pub max_deadline: DateTime<Utc>,
    pub can_resolve: bool,
    pub reason: String,
}

/// Whether `now` falls in the reporting window. Past the hard deadline
/// the market must be resolved.
#[must_use]
pub fn resolution_window(game: &Game, now: DateTime<Utc>) -> ResolutionWindow {
    let target_time = sports_resolve_at(game);
    let max_deadline = sports_max_deadline(game);

    let (can_resolve, reason) = if now < target_time {
        (
            false,
            format!(
                "Wait until target time: {}",
                target_time.format("%Y-%m-%d %H:%M UTC")
            ),
        )
    } else if now > max_deadline {
        (true, "Past deadline - must resolve".to_string())
    } else {
        (true, "Within resolution window".to_string())
    };

    ResolutionWindow {
        target_time,
        max_deadline,
        can_resolve,
        reason,
    }
}

/// Verdict derived from a game's final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResolution {
    pub can_resolve: bool,
    pub home_wins: Option<bool>,
    pub reason: String,
}

impl GameResolution {
    fn blocked(reason: impl Into<String>) -> Self {
        Self {
            can_resolve: false,
            home_wins: None,
            reason: reason.into(),
        }
    }
}

/// Decide the winner. Only a `Final` game with both scores and no tie
/// resolves.
#[must_use]
pub fn resolve_game(status: &GameStatus, game: &Game) -> GameResolution {
    if status.state != GameState::Final {
        return GameResolution::blocked(format!(
            "Game status is \"{}\", not \"final\"",
            status.state
        ));
    }

    let (Some(home), Some(away)) = (status.home_score, status.away_score) else {
        return GameResolution::blocked("Final scores not available");
    };

    if home == away {
        return GameResolution::blocked("Game ended in a tie - unusual for NBA/NFL");
    }

    let home_wins = home > away;
    let winner = if home_wins { &game.home } else { &game.away };
    GameResolution {
        can_resolve: true,
        home_wins: Some(home_wins),
        reason: format!(
            "{}: {home}, {}: {away} - {winner} wins",
            game.home, game.away
        ),
    }
}
