//! Handler for the `assets` command group.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::AssetsCommand;
use super::output;
use crate::application::template::crypto::{format_thousands, target_suggestions};
use crate::domain::crypto::CryptoAsset;
use crate::error::Result;
use crate::infrastructure::bootstrap::AppContext;

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Market Cap")]
    market_cap: String,
}

fn dollars(value: f64) -> String {
    Decimal::from_f64_retain(value)
        .map(|d| format!("${}", format_thousands(d.round_dp(2))))
        .unwrap_or_else(|| "-".to_string())
}

fn print_assets(command: &str, assets: &[CryptoAsset]) {
    if output::is_json() {
        output::json_output(&json!({
            "command": command,
            "assets": assets,
        }));
        return;
    }
    if assets.is_empty() {
        output::note("No assets found.");
        return;
    }

    let rows: Vec<AssetRow> = assets
        .iter()
        .enumerate()
        .map(|(i, asset)| AssetRow {
            rank: i + 1,
            id: asset.id.to_string(),
            symbol: asset.symbol.to_uppercase(),
            name: asset.name.clone(),
            price: dollars(asset.current_price),
            market_cap: dollars(asset.market_cap.round()),
        })
        .collect();
    output::table(Table::new(rows));
}

pub async fn execute(ctx: &AppContext, cmd: AssetsCommand) -> Result<()> {
    match cmd {
        AssetsCommand::Top(args) => {
            let catalog = ctx.crypto_catalog();
            let pb = output::spinner("Fetching top assets");
            let mut assets = catalog.top_assets().await;
            assets.truncate(args.limit);
            output::spinner_success(&pb, &format!("{} assets", assets.len()));
            output::section("Top assets");
            print_assets("assets.top", &assets);
        }
        AssetsCommand::Search(args) => {
            let catalog = ctx.crypto_catalog();
            let pb = output::spinner(&format!("Searching for {}", args.query));
            let assets = catalog.search(&args.query).await;
            output::spinner_success(&pb, &format!("{} matches", assets.len()));
            output::section(&format!("Results for \"{}\"", args.query));
            print_assets("assets.search", &assets);
        }
        AssetsCommand::Targets(args) => {
            let targets = target_suggestions(args.price);
            if output::is_json() {
                output::json_output(&json!({
                    "command": "assets.targets",
                    "price": args.price,
                    "targets": targets,
                }));
                return Ok(());
            }
            output::section(&format!("Targets above {}", dollars(args.price)));
            for target in targets {
                output::note(&format!("${}", format_thousands(Decimal::from(target))));
            }
        }
    }
    Ok(())
}
