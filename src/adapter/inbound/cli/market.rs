//! Handler for the `market` command group.

use chrono::{DateTime, Utc};
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{MarketCommand, MarketCreateArgs, MarketQuoteArgs};
use super::{confirm, output, template};
use crate::application::create::CreateMarketService;
use crate::application::dedup::validate_market_params;
use crate::application::market::MarketService;
use crate::application::template::MarketDraft;
use crate::domain::id::MarketId;
use crate::domain::market::PartialMarketParams;
use crate::domain::money::{
    effective_price, format_probability, format_time_remaining, format_usdc_compact,
    from_base_units, to_base_units, truncate_address, USDC_DECIMALS,
};
use crate::domain::protocol::DEFAULT_MARKET_LIQUIDITY;
use crate::error::{CreateError, Result};
use crate::infrastructure::bootstrap::AppContext;

#[derive(Tabled)]
struct CreatedRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "AMM")]
    amm: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

pub async fn execute(ctx: &AppContext, cmd: MarketCommand) -> Result<()> {
    match cmd {
        MarketCommand::Show(args) => show(ctx, args.id).await,
        MarketCommand::Quote(args) => {
            quote(&args);
            Ok(())
        }
        MarketCommand::Create(args) => create(ctx, *args).await,
        MarketCommand::List(args) => {
            if args.onchain {
                list_onchain(ctx).await
            } else {
                list_local(ctx)
            }
        }
    }
}

fn utc(secs: u64) -> DateTime<Utc> {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .unwrap_or_default()
}

async fn show(ctx: &AppContext, id: MarketId) -> Result<()> {
    let service = ctx.market_service()?;
    let pb = output::spinner("Reading market");
    let snapshot = match service.snapshot(id).await {
        Ok(snapshot) => {
            output::spinner_success(&pb, "Market loaded");
            snapshot
        }
        Err(e) => {
            output::spinner_fail(&pb, "Market unavailable");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(&json!({
            "command": "market.show",
            "market_id": id,
            "yes_probability_bps": snapshot.yes_probability_bps(),
            "snapshot": snapshot,
        }));
        return Ok(());
    }

    let event = &snapshot.event;
    let chain = &ctx.config.chain;
    let resolve_at = utc(event.resolve_at);

    output::section(&event.title);
    output::field("Id", id);
    output::field("Category", &event.category);
    output::field("Creator", truncate_address(&event.creator.to_string(), 6));
    if let Some(amm) = event.amm() {
        output::field("AMM", chain.address_url(&amm));
    }
    output::field(
        "Resolves",
        format!(
            "{} ({})",
            resolve_at.format("%Y-%m-%d %H:%M UTC"),
            format_time_remaining(resolve_at, ctx.clock().now())
        ),
    );
    output::field("Source", &event.primary_source);
    if event.finalized {
        output::field("Status", output::muted("finalized"));
    }

    let reserves = &snapshot.reserves;
    output::section("Pool");
    output::field(
        "YES",
        output::positive(format_probability(snapshot.yes_probability_bps())),
    );
    output::field(
        "Liquidity",
        format_usdc_compact(reserves.liquidity_usd, USDC_DECIMALS),
    );
    output::field(
        "Volume",
        format_usdc_compact(reserves.volume_usd, USDC_DECIMALS),
    );

    if let Some(position) = &snapshot.position {
        output::section("Your position");
        output::field("YES tokens", from_base_units(position.yes_tokens));
        output::field("NO tokens", from_base_units(position.no_tokens));
        output::field(
            "LP share",
            format!("{:.2}%", snapshot.user_lp_share()),
        );
    }
    Ok(())
}

fn quote(args: &MarketQuoteArgs) {
    let side = args.side.into();
    let quote = MarketService::quote(side, args.amount);
    let avg_price = effective_price(to_base_units(args.amount), quote.tokens_out);

    if output::is_json() {
        output::json_output(&json!({
            "command": "market.quote",
            "side": side,
            "amount": args.amount,
            "quote": quote,
            "avg_price": avg_price,
        }));
        return;
    }

    output::section(&format!("Buy {side} for ${}", args.amount));
    output::field("Tokens out", from_base_units(quote.tokens_out));
    output::field("Avg price", format!("${avg_price}"));
    output::field("Fee", format!("${}", from_base_units(quote.fee)));
    output::note("Estimate only; the AMM price decides the final amount.");
}

/// Template (if any) with explicit fields layered on top.
async fn draft(ctx: &AppContext, args: &MarketCreateArgs) -> Result<MarketDraft> {
    let base = match (&args.league, &args.game_id, &args.asset) {
        (Some(league), Some(game_id), _) => {
            Some(template::sports_draft(ctx, *league, game_id).await?.0)
        }
        (_, _, Some(asset)) => match (args.target, args.date) {
            (Some(target), Some(date)) => {
                Some(template::crypto_draft(ctx, asset, target, date).await?)
            }
            _ => None,
        },
        _ => None,
    };

    let mut params = base
        .as_ref()
        .map(|d| PartialMarketParams::from(d.params.clone()))
        .unwrap_or_default();
    params.merge(PartialMarketParams {
        category: args.category.clone(),
        title: args.title.clone(),
        resolve_at: args.resolve_at,
        primary_source: args.source.clone(),
        rules: args.rules.clone(),
    });

    if let Err(errors) = validate_market_params(&params, ctx.clock().now()) {
        return Err(CreateError::InvalidParams { errors }.into());
    }
    let complete = params.complete().ok_or_else(|| CreateError::InvalidParams {
        errors: vec!["Market parameters are incomplete".to_string()],
    })?;

    Ok(match base {
        Some(mut draft) => {
            draft.params = complete;
            draft
        }
        None => MarketDraft::manual(complete),
    })
}

async fn ensure_allowance(
    service: &CreateMarketService,
    total: rust_decimal::Decimal,
    approve: bool,
    yes: bool,
) -> Result<()> {
    let allowance = service.factory_allowance().await?;
    if CreateMarketService::allowance_sufficient(allowance, to_base_units(total)) {
        return Ok(());
    }
    if !approve {
        output::hint("pass --approve to approve the event factory first");
        return Ok(());
    }
    if !confirm(&format!("Approve ${total} USDC for the event factory?"), yes)? {
        return Ok(());
    }

    let pb = output::spinner("Approving USDC");
    match service.approve(total).await {
        Ok(receipt) => {
            output::spinner_success(&pb, &format!("Approved ({})", receipt.tx_hash));
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Approval failed");
            Err(e)
        }
    }
}

async fn create(ctx: &AppContext, args: MarketCreateArgs) -> Result<()> {
    let draft = draft(ctx, &args).await?;
    let service = ctx.create_service()?;
    let liquidity = args.liquidity.unwrap_or(DEFAULT_MARKET_LIQUIDITY);
    let required = service.required_amounts(liquidity).await?;

    if !output::is_json() {
        template::print_draft(&draft);
        output::section("Cost");
        output::field("Create bond", format!("${}", required.create_bond));
        output::field("Liquidity", format!("${}", required.liquidity));
        output::field("Total", output::highlight(format!("${}", required.total)));
    }

    ensure_allowance(&service, required.total, args.approve, args.confirm.yes).await?;

    if !confirm("Create this market?", args.confirm.yes)? {
        output::note("Cancelled.");
        return Ok(());
    }

    let pb = output::spinner("Creating market");
    let receipt = match service.create(&draft.params, liquidity).await {
        Ok(receipt) => {
            output::spinner_success(&pb, "Market created");
            receipt
        }
        Err(e) => {
            output::spinner_fail(&pb, "Market creation failed");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(&json!({
            "command": "market.create",
            "draft": draft,
            "required": required,
            "receipt": receipt,
        }));
        return Ok(());
    }

    let chain = &ctx.config.chain;
    output::field("Id", output::highlight(receipt.market_id));
    output::field("Transaction", chain.tx_url(&receipt.tx_hash));
    if let Some(amm) = receipt.amm_address {
        output::field("AMM", chain.address_url(&amm));
    }
    Ok(())
}

fn list_local(ctx: &AppContext) -> Result<()> {
    let markets = ctx.registry()?.list()?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "market.list",
            "markets": markets,
        }));
        return Ok(());
    }
    if markets.is_empty() {
        output::note("No markets created yet.");
        return Ok(());
    }

    let rows: Vec<CreatedRow> = markets
        .iter()
        .map(|m| CreatedRow {
            id: m.id.short(),
            title: m.title.clone(),
            category: m.category.clone(),
            amm: m
                .amm_address
                .map(|a| truncate_address(&a.to_string(), 6))
                .unwrap_or_else(|| "-".to_string()),
            created_at: m.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();
    output::section("Created markets");
    output::table(Table::new(rows));
    Ok(())
}

async fn list_onchain(ctx: &AppContext) -> Result<()> {
    let service = ctx.create_service()?;
    let pb = output::spinner("Reading factory events");
    let ids = service.onchain_markets().await?;
    output::spinner_success(&pb, &format!("{} events", ids.len()));

    if output::is_json() {
        output::json_output(&json!({
            "command": "market.list",
            "onchain": true,
            "markets": ids,
        }));
        return Ok(());
    }

    output::section("Events created by this wallet");
    for id in ids {
        output::note(&id.to_string());
    }
    Ok(())
}
