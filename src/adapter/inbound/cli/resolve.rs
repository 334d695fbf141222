//! Handler for the `resolve` command group.

use rust_decimal::Decimal;
use serde_json::json;

use super::command::{
    ResolveArbiterArgs, ResolveCommand, ResolveDisputeArgs, ResolveInvalidateArgs,
    ResolveReportArgs,
};
use super::{confirm, output};
use crate::domain::evidence::EvidenceData;
use crate::domain::id::MarketId;
use crate::domain::money::{from_base_units, to_base_units};
use crate::domain::protocol::{MIN_DISPUTE_BOND, REPORT_BOND};
use crate::error::Result;
use crate::infrastructure::bootstrap::AppContext;
use crate::port::outbound::chain::TxReceipt;

pub async fn execute(ctx: &AppContext, cmd: ResolveCommand) -> Result<()> {
    match cmd {
        ResolveCommand::Status(args) => status(ctx, args.id, args.evidence).await,
        ResolveCommand::Report(args) => report(ctx, args).await,
        ResolveCommand::Dispute(args) => dispute(ctx, args).await,
        ResolveCommand::Arbiter(args) => arbiter(ctx, args).await,
        ResolveCommand::Invalidate(args) => invalidate(ctx, args).await,
    }
}

fn outcome_label(outcome: Option<bool>) -> String {
    match outcome {
        Some(true) => output::positive("YES"),
        Some(false) => output::negative("NO"),
        None => output::muted("-"),
    }
}

fn print_evidence(evidence: &EvidenceData) {
    output::section("Evidence");
    output::field("Source", &evidence.source_url);
    output::field("Fetched", &evidence.fetched_at);
    output::field("Outcome", evidence.parsed_outcome.as_str());
    if let Some(raw) = &evidence.raw_value {
        output::field("Value", raw);
    }
    if !evidence.notes.is_empty() {
        output::field("Notes", &evidence.notes);
    }
}

async fn status(ctx: &AppContext, id: MarketId, with_evidence: bool) -> Result<()> {
    let service = ctx.resolution_service()?;
    let status = service.status(id).await?;
    let evidence = match (&status.info.evidence_uri, with_evidence) {
        (Some(uri), true) => Some(service.fetch_evidence(uri).await?),
        _ => None,
    };

    if output::is_json() {
        output::json_output(&json!({
            "command": "resolve.status",
            "market_id": id,
            "status": status,
            "evidence": evidence,
        }));
        return Ok(());
    }

    let info = &status.info;
    output::section(&format!("Resolution of {}", id.short()));
    output::field("State", output::highlight(status.label));
    if let Some(reporter) = info.reporter {
        output::field("Reporter", reporter);
        output::field("Reported", outcome_label(info.reported_outcome));
    }
    if let Some(uri) = &info.evidence_uri {
        output::field("Evidence", uri);
    }
    if let Some(disputer) = info.disputer {
        output::field("Disputer", disputer);
    }
    if let Some(reason) = &info.dispute_reason {
        output::field("Dispute", reason);
    }
    if status.is_resolved {
        if info.is_invalid {
            output::field("Final", output::negative("INVALID"));
        } else {
            output::field("Final", outcome_label(info.final_outcome));
        }
    }

    if status.can_report {
        output::hint(&format!("report with a ${REPORT_BOND} USDC bond"));
    } else if status.can_dispute {
        output::hint(&format!("dispute with at least ${MIN_DISPUTE_BOND} USDC"));
    }

    if let Some(evidence) = &evidence {
        print_evidence(evidence);
    }
    Ok(())
}

/// Approve the resolution manager for `bond` when its allowance is short.
/// Returns `false` when the user declined.
async fn ensure_bond_allowance(ctx: &AppContext, bond: Decimal, yes: bool) -> Result<bool> {
    let (wallet, chain) = ctx.wallet_service()?;
    let spender = chain.addresses().resolution_manager;
    let allowance = wallet.allowance(spender).await?;
    if allowance >= to_base_units(bond) {
        return Ok(true);
    }

    output::note(&format!(
        "Resolution manager allowance is ${}, below the ${bond} bond.",
        from_base_units(allowance)
    ));
    if !confirm(&format!("Approve ${bond} USDC for the bond?"), yes)? {
        return Ok(false);
    }
    let receipt = wallet.approve(spender, Some(bond)).await?;
    output::success(&format!("Approved ({})", receipt.tx_hash));
    Ok(true)
}

fn print_tx(ctx: &AppContext, command: &str, id: MarketId, receipt: &TxReceipt) {
    if output::is_json() {
        output::json_output(&json!({
            "command": command,
            "market_id": id,
            "tx_hash": receipt.tx_hash,
        }));
        return;
    }
    output::field("Transaction", ctx.config.chain.tx_url(&receipt.tx_hash));
}

async fn report(ctx: &AppContext, args: ResolveReportArgs) -> Result<()> {
    let service = ctx.resolution_service()?;
    let outcome = bool::from(args.outcome);

    if !output::is_json() {
        output::section(&format!("Report {}", args.id.short()));
        output::field("Outcome", outcome_label(Some(outcome)));
        output::field("Source", &args.source);
        output::field("Bond", format!("${REPORT_BOND}"));
    }

    if !ensure_bond_allowance(ctx, REPORT_BOND, args.confirm.yes).await? {
        output::note("Cancelled.");
        return Ok(());
    }
    if !confirm("Pin evidence and submit this report?", args.confirm.yes)? {
        output::note("Cancelled.");
        return Ok(());
    }

    let pb = output::spinner("Pinning evidence and reporting");
    let submission = match service
        .report(args.id, outcome, &args.source, &args.value, &args.notes)
        .await
    {
        Ok(submission) => {
            output::spinner_success(&pb, "Report submitted");
            submission
        }
        Err(e) => {
            output::spinner_fail(&pb, "Report failed");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(&json!({
            "command": "resolve.report",
            "market_id": args.id,
            "outcome": outcome,
            "submission": submission,
        }));
        return Ok(());
    }
    output::field("Evidence", &submission.evidence_uri);
    output::field(
        "Transaction",
        ctx.config.chain.tx_url(&submission.tx_hash),
    );
    Ok(())
}

async fn dispute(ctx: &AppContext, args: ResolveDisputeArgs) -> Result<()> {
    let service = ctx.resolution_service()?;

    if !output::is_json() {
        output::section(&format!("Dispute {}", args.id.short()));
        output::field("Reason", &args.reason_url);
        output::field("Bond", format!("${MIN_DISPUTE_BOND}"));
    }

    if !ensure_bond_allowance(ctx, MIN_DISPUTE_BOND, args.confirm.yes).await? {
        output::note("Cancelled.");
        return Ok(());
    }
    if !confirm("Pin counter-evidence and dispute?", args.confirm.yes)? {
        output::note("Cancelled.");
        return Ok(());
    }

    let pb = output::spinner("Pinning counter-evidence and disputing");
    let submission = match service
        .dispute(args.id, &args.reason_url, &args.evidence, &args.notes)
        .await
    {
        Ok(submission) => {
            output::spinner_success(&pb, "Dispute submitted");
            submission
        }
        Err(e) => {
            output::spinner_fail(&pb, "Dispute failed");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(&json!({
            "command": "resolve.dispute",
            "market_id": args.id,
            "submission": submission,
        }));
        return Ok(());
    }
    output::field("Evidence", &submission.evidence_uri);
    output::field(
        "Transaction",
        ctx.config.chain.tx_url(&submission.tx_hash),
    );
    Ok(())
}

async fn arbiter(ctx: &AppContext, args: ResolveArbiterArgs) -> Result<()> {
    let service = ctx.resolution_service()?;
    let outcome = bool::from(args.outcome);
    let label = if outcome { "YES" } else { "NO" };
    if !confirm(
        &format!("Resolve {} as {label}?", args.id.short()),
        args.confirm.yes,
    )? {
        output::note("Cancelled.");
        return Ok(());
    }

    let receipt = service.arbiter_resolve(args.id, outcome).await?;
    output::success(&format!("Resolved as {label}"));
    print_tx(ctx, "resolve.arbiter", args.id, &receipt);
    Ok(())
}

async fn invalidate(ctx: &AppContext, args: ResolveInvalidateArgs) -> Result<()> {
    let service = ctx.resolution_service()?;
    if !confirm(
        &format!("Invalidate {}? Traders are refunded.", args.id.short()),
        args.confirm.yes,
    )? {
        output::note("Cancelled.");
        return Ok(());
    }

    let receipt = service.invalidate(args.id).await?;
    output::success("Market invalidated");
    print_tx(ctx, "resolve.invalidate", args.id, &receipt);
    Ok(())
}
