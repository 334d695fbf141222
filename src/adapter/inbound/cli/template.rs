//! Handler for the `template` command group.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use super::command::TemplateCommand;
use super::output;
use crate::application::dedup::market_hash;
use crate::application::template::{format_resolution_requirements, MarketDraft};
use crate::domain::crypto::CryptoAsset;
use crate::domain::sports::{Game, League};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::AppContext;

/// Look up an upcoming game by id.
pub(super) async fn find_game(ctx: &AppContext, league: League, game_id: &str) -> Result<Game> {
    ctx.sports_catalog()
        .upcoming_games(league, None)
        .await
        .into_iter()
        .find(|g| g.id.as_str() == game_id)
        .ok_or_else(|| Error::NotFound(format!("upcoming {league} game {game_id}")))
}

/// Look up an asset by exact id or symbol, falling back to the first
/// search hit.
pub(super) async fn find_asset(ctx: &AppContext, query: &str) -> Result<CryptoAsset> {
    let hits = ctx.crypto_catalog().search(query).await;
    let wanted = query.trim();
    let index = hits
        .iter()
        .position(|a| {
            a.id.as_str().eq_ignore_ascii_case(wanted) || a.symbol.eq_ignore_ascii_case(wanted)
        })
        .unwrap_or(0);
    hits.into_iter()
        .nth(index)
        .ok_or_else(|| Error::NotFound(format!("asset {query}")))
}

/// Draft for a game, warning when it starts too soon to template.
pub(super) async fn sports_draft(
    ctx: &AppContext,
    league: League,
    game_id: &str,
) -> Result<(MarketDraft, Game)> {
    let game = find_game(ctx, league, game_id).await?;
    let info = ctx.sports_catalog().time_info(&game);
    if info.is_past {
        output::warning("This game has already started.");
    } else if info.is_too_soon {
        output::warning(&format!(
            "Game starts in {:.1}h, under the {}h minimum lead time.",
            info.hours_until_game, info.min_lead_hours
        ));
    }
    Ok((MarketDraft::from_game(&game), game))
}

pub(super) async fn crypto_draft(
    ctx: &AppContext,
    asset: &str,
    target: Decimal,
    date: NaiveDate,
) -> Result<MarketDraft> {
    let asset = find_asset(ctx, asset).await?;
    Ok(MarketDraft::from_crypto(&asset, target, date))
}

fn timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// Human-readable draft.
pub(super) fn print_draft(draft: &MarketDraft) {
    let params = &draft.params;
    output::section("Market");
    output::field("Title", output::highlight(&params.title));
    output::field("Category", &params.category);
    output::field("Resolves", timestamp(params.resolve_at));
    output::field("Source", &params.primary_source);
    output::field("Id", market_hash(params));
    output::section("Rules");
    output::lines(&params.rules);
}

pub async fn execute(ctx: &AppContext, cmd: TemplateCommand) -> Result<()> {
    let (draft, game) = match cmd {
        TemplateCommand::Sports(args) => {
            let (draft, game) = sports_draft(ctx, args.league, &args.game_id).await?;
            (draft, Some(game))
        }
        TemplateCommand::Crypto(args) => {
            (crypto_draft(ctx, &args.asset, args.target, args.date).await?, None)
        }
    };

    if output::is_json() {
        output::json_output(&json!({
            "command": "template",
            "market_id": market_hash(&draft.params),
            "draft": draft,
        }));
        return Ok(());
    }

    print_draft(&draft);
    if let Some(game) = game {
        output::section("Reporting");
        output::lines(&format_resolution_requirements(&game));
    }
    Ok(())
}
