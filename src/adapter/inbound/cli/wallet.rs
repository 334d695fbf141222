//! Handler for the `wallet` command group.

use serde_json::json;

use super::command::{WalletApproveArgs, WalletCommand};
use super::{confirm, output};
use crate::application::create::max_sane_allowance;
use crate::domain::money::from_base_units;
use crate::error::Result;
use crate::infrastructure::bootstrap::AppContext;

pub async fn execute(ctx: &AppContext, cmd: WalletCommand) -> Result<()> {
    match cmd {
        WalletCommand::Balance => balance(ctx).await,
        WalletCommand::Approve(args) => approve(ctx, args).await,
    }
}

fn allowance_label(units: alloy_primitives::U256) -> String {
    if units > max_sane_allowance() {
        "unlimited".to_string()
    } else {
        format!("${}", from_base_units(units))
    }
}

async fn balance(ctx: &AppContext) -> Result<()> {
    let (wallet, chain) = ctx.wallet_service()?;
    let owner = wallet.owner()?;
    let addresses = chain.addresses();

    let pb = output::spinner("Reading balances");
    let balance = wallet.balance().await?;
    let factory = wallet.allowance(addresses.event_factory).await?;
    let manager = wallet.allowance(addresses.resolution_manager).await?;
    output::spinner_success(&pb, "Balances loaded");

    if output::is_json() {
        output::json_output(&json!({
            "command": "wallet.balance",
            "address": owner,
            "usdc": balance,
            "allowances": {
                "event_factory": factory,
                "resolution_manager": manager,
            },
        }));
        return Ok(());
    }

    output::section("Wallet");
    output::field("Address", ctx.config.chain.address_url(&owner));
    output::field("USDC", output::highlight(format!("${balance}")));
    output::section("Allowances");
    output::field("Factory", allowance_label(factory));
    output::field("Resolution", allowance_label(manager));
    Ok(())
}

async fn approve(ctx: &AppContext, args: WalletApproveArgs) -> Result<()> {
    let (wallet, chain) = ctx.wallet_service()?;
    let spender = args.spender.unwrap_or(chain.addresses().event_factory);
    let amount = args
        .amount
        .map_or_else(|| "unlimited".to_string(), |a| format!("${a}"));

    if !confirm(
        &format!("Approve {amount} USDC for {spender}?"),
        args.confirm.yes,
    )? {
        output::note("Cancelled.");
        return Ok(());
    }

    let pb = output::spinner("Approving USDC");
    let receipt = match wallet.approve(spender, args.amount).await {
        Ok(receipt) => {
            output::spinner_success(&pb, "Approved");
            receipt
        }
        Err(e) => {
            output::spinner_fail(&pb, "Approval failed");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(&json!({
            "command": "wallet.approve",
            "spender": spender,
            "amount": args.amount,
            "tx_hash": receipt.tx_hash,
        }));
        return Ok(());
    }
    output::field("Spender", spender);
    output::field("Amount", amount);
    output::field("Transaction", ctx.config.chain.tx_url(&receipt.tx_hash));
    Ok(())
}
