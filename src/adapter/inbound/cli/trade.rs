//! Handler for the `trade` command group.
//!
//! Trades spend USDC from the configured wallet; the market's AMM is
//! approved for exactly the trade amount when its allowance falls short.

use rust_decimal::Decimal;
use serde_json::json;

use super::command::{TradeBuyArgs, TradeCommand, TradeLiquidityArgs};
use super::{confirm, output};
use crate::application::market::MarketService;
use crate::domain::id::MarketId;
use crate::domain::market::{MarketSnapshot, TradeSide};
use crate::domain::money::{from_base_units, price_impact, to_base_units};
use crate::domain::protocol::TRADE_FEE_BPS;
use crate::error::Result;
use crate::infrastructure::bootstrap::AppContext;
use crate::port::outbound::chain::TxReceipt;

pub async fn execute(ctx: &AppContext, cmd: TradeCommand) -> Result<()> {
    match cmd {
        TradeCommand::Buy(args) => buy(ctx, args).await,
        TradeCommand::Liquidity(args) => liquidity(ctx, args).await,
    }
}

/// Returns `false` when the user declined the approval.
async fn ensure_allowance(
    ctx: &AppContext,
    service: &MarketService,
    id: MarketId,
    amount: Decimal,
    yes: bool,
) -> Result<bool> {
    let spender = service.spender(id).await?;
    let (wallet, _) = ctx.wallet_service()?;
    let allowance = wallet.allowance(spender).await?;
    if allowance >= to_base_units(amount) {
        return Ok(true);
    }

    output::note(&format!(
        "AMM allowance is ${}, below ${amount}.",
        from_base_units(allowance)
    ));
    if !confirm(&format!("Approve ${amount} USDC for this market?"), yes)? {
        return Ok(false);
    }
    let pb = output::spinner("Approving USDC");
    match wallet.approve(spender, Some(amount)).await {
        Ok(receipt) => {
            output::spinner_success(&pb, &format!("Approved ({})", receipt.tx_hash));
            Ok(true)
        }
        Err(e) => {
            output::spinner_fail(&pb, "Approval failed");
            Err(e)
        }
    }
}

fn report(
    ctx: &AppContext,
    command: &str,
    id: MarketId,
    receipt: &TxReceipt,
    impact_pct: Option<f64>,
) {
    if output::is_json() {
        output::json_output(&json!({
            "command": command,
            "market_id": id,
            "tx_hash": receipt.tx_hash,
            "block_number": receipt.block_number,
            "price_impact_pct": impact_pct,
        }));
        return;
    }
    if let Some(impact) = impact_pct {
        output::field("Price impact", format!("{impact:.2}%"));
    }
    output::field("Transaction", ctx.config.chain.tx_url(&receipt.tx_hash));
}

/// Move in the bought side's price between two snapshots, in percent.
async fn observed_impact(
    service: &MarketService,
    id: MarketId,
    side: TradeSide,
    before: Option<MarketSnapshot>,
) -> Option<f64> {
    let before = before?;
    let after = service.snapshot(id).await.ok()?;
    Some(price_impact(before.side_price(side), after.side_price(side)))
}

async fn buy(ctx: &AppContext, args: TradeBuyArgs) -> Result<()> {
    let service = ctx.market_service()?;
    let side = args.side.into();
    let quote = MarketService::quote(side, args.amount);

    if !output::is_json() {
        output::section(&format!("Buy {side} in {}", args.id.short()));
        output::field("Amount", format!("${}", args.amount));
        output::field("Est. tokens", from_base_units(quote.tokens_out));
        output::field("Trade fee", format!("{} bps", TRADE_FEE_BPS));
    }

    if !ensure_allowance(ctx, &service, args.id, args.amount, args.confirm.yes).await? {
        output::note("Cancelled.");
        return Ok(());
    }
    if !confirm(&format!("Buy {side} for ${}?", args.amount), args.confirm.yes)? {
        output::note("Cancelled.");
        return Ok(());
    }

    let before = service.snapshot(args.id).await.ok();
    let pb = output::spinner("Submitting trade");
    match service.buy(args.id, side, args.amount).await {
        Ok(receipt) => {
            output::spinner_success(&pb, "Trade confirmed");
            let impact = observed_impact(&service, args.id, side, before).await;
            report(ctx, "trade.buy", args.id, &receipt, impact);
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Trade failed");
            Err(e)
        }
    }
}

async fn liquidity(ctx: &AppContext, args: TradeLiquidityArgs) -> Result<()> {
    let service = ctx.market_service()?;

    if !output::is_json() {
        output::section(&format!("Provide liquidity to {}", args.id.short()));
        output::field("Amount", format!("${}", args.amount));
    }

    if !ensure_allowance(ctx, &service, args.id, args.amount, args.confirm.yes).await? {
        output::note("Cancelled.");
        return Ok(());
    }
    if !confirm(
        &format!("Add ${} of liquidity?", args.amount),
        args.confirm.yes,
    )? {
        output::note("Cancelled.");
        return Ok(());
    }

    let pb = output::spinner("Adding liquidity");
    match service.provide_liquidity(args.id, args.amount).await {
        Ok(receipt) => {
            output::spinner_success(&pb, "Liquidity added");
            report(ctx, "trade.liquidity", args.id, &receipt, None);
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Liquidity failed");
            Err(e)
        }
    }
}
