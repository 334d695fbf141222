//! Handler for the `games` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{GameStatusArgs, GamesCommand, GamesListArgs};
use super::output;
use crate::application::catalog::SportsCatalog;
use crate::domain::id::GameId;
use crate::domain::money::format_time_remaining;
use crate::domain::sports::{Game, GameStatus};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::AppContext;

#[derive(Tabled)]
struct GameRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Starts (UTC)")]
    starts: String,
    #[tabled(rename = "Matchup")]
    matchup: String,
    #[tabled(rename = "Venue")]
    venue: String,
    #[tabled(rename = "In")]
    lead: String,
}

pub async fn execute(ctx: &AppContext, cmd: GamesCommand) -> Result<()> {
    match cmd {
        GamesCommand::List(args) => list(ctx, args).await,
        GamesCommand::Status(args) => status(ctx, args).await,
    }
}

async fn list(ctx: &AppContext, args: GamesListArgs) -> Result<()> {
    let catalog = ctx.sports_catalog();
    let range = args.range.map(|preset| catalog.preset(preset));
    if let Some(range) = &range {
        catalog.validate_range(range)?;
    }

    let pb = output::spinner(&format!("Fetching {} games", args.league));
    let games = match (args.refresh, range) {
        (true, None) => catalog.force_refresh(args.league).await,
        (true, Some(range)) => {
            catalog.clear_cache();
            catalog.upcoming_games(args.league, Some(range)).await
        }
        (false, range) => catalog.upcoming_games(args.league, range).await,
    };
    output::spinner_success(&pb, &format!("{} games", games.len()));

    if output::is_json() {
        output::json_output(&json!({
            "command": "games.list",
            "league": args.league,
            "games": games,
        }));
        return Ok(());
    }

    if games.is_empty() {
        output::note("No games in range.");
        return Ok(());
    }

    let now = ctx.clock().now();
    let rows: Vec<GameRow> = games
        .iter()
        .map(|game| {
            let info = catalog.time_info(game);
            let lead = format_time_remaining(game.starts_at, now);
            GameRow {
                id: game.id.to_string(),
                starts: game.starts_at.format("%a %b %d %H:%M").to_string(),
                matchup: format!("{} @ {}", game.away, game.home),
                venue: game.venue.clone().unwrap_or_default(),
                lead: if info.is_too_soon {
                    format!("{lead} (too soon)")
                } else {
                    lead
                },
            }
        })
        .collect();

    output::section(&format!("Upcoming {} games", args.league));
    output::table(Table::new(rows));
    output::hint(&format!(
        "games starting within {}h cannot be templated",
        catalog.settings().min_lead_hours
    ));
    Ok(())
}

fn same_team(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// An upcoming game matching both team names, else one built from
/// `--starts-at`.
async fn find_game(catalog: &SportsCatalog, args: &GameStatusArgs) -> Result<Game> {
    let upcoming = catalog.upcoming_games(args.league, None).await;
    if let Some(game) = upcoming
        .into_iter()
        .find(|g| same_team(&g.home, &args.home) && same_team(&g.away, &args.away))
    {
        return Ok(game);
    }

    let starts_at = args.starts_at.ok_or_else(|| {
        Error::NotFound(format!(
            "upcoming {} game {} @ {} (pass --starts-at for past games)",
            args.league, args.away, args.home
        ))
    })?;
    Ok(Game {
        id: GameId::new(format!("{}_manual", args.league.code())),
        league: args.league,
        starts_at,
        home: args.home.clone(),
        away: args.away.clone(),
        venue: None,
        source_url: None,
        allows_draw: args.league.allows_draw(),
    })
}

fn score(status: &GameStatus) -> String {
    match (status.home_score, status.away_score) {
        (Some(home), Some(away)) => format!("{home} - {away}"),
        _ => "-".to_string(),
    }
}

async fn status(ctx: &AppContext, args: GameStatusArgs) -> Result<()> {
    let catalog = ctx.sports_catalog();
    let game = find_game(&catalog, &args).await?;

    let pb = output::spinner("Checking game status");
    let info = catalog.resolution_info(&game).await;
    if info.status.is_some() {
        output::spinner_success(&pb, "Status received");
    } else {
        output::spinner_fail(&pb, "No provider returned a status");
    }

    if output::is_json() {
        output::json_output(&json!({
            "command": "games.status",
            "game": game,
            "resolution": info,
        }));
        return Ok(());
    }

    output::section(&format!("{} @ {}", game.away, game.home));
    output::field("League", game.league);
    output::field("Starts", game.starts_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(status) = &info.status {
        output::field("State", status.state);
        output::field("Score", score(status));
        output::field("Source", &status.source);
    }

    output::section("Resolution");
    output::field(
        "Target",
        info.window.target_time.format("%Y-%m-%d %H:%M UTC"),
    );
    output::field(
        "Deadline",
        info.window.max_deadline.format("%Y-%m-%d %H:%M UTC"),
    );
    if info.window.can_resolve {
        output::field("Window", output::positive("open"));
    } else {
        output::field("Window", output::muted(&info.window.reason));
    }

    match &info.resolution {
        Some(resolution) if resolution.can_resolve => {
            let winner = match resolution.home_wins {
                Some(true) => &game.home,
                _ => &game.away,
            };
            output::field("Outcome", output::highlight(format!("{winner} win")));
            output::success(&resolution.reason);
        }
        Some(resolution) => output::note(&resolution.reason),
        None => output::note("Outcome unknown until a status is available."),
    }
    Ok(())
}
