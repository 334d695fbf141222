//! Handler for `hash`.

use serde_json::json;

use super::command::HashArgs;
use super::output;
use crate::application::dedup::{market_hash, packed_params, validate_market_params};
use crate::domain::market::{MarketParams, PartialMarketParams};
use crate::error::Result;
use crate::infrastructure::bootstrap::AppContext;

pub fn execute(ctx: &AppContext, args: &HashArgs) -> Result<()> {
    let params = MarketParams {
        category: args.category.clone(),
        title: args.title.clone(),
        resolve_at: args.resolve_at,
        primary_source: args.source.clone(),
        rules: args.rules.clone(),
    };
    let market_id = market_hash(&params);
    let problems =
        validate_market_params(&PartialMarketParams::from(params.clone()), ctx.clock().now())
            .err()
            .unwrap_or_default();

    if output::is_json() {
        output::json_output(&json!({
            "command": "hash",
            "market_id": market_id,
            "packed": packed_params(&params),
            "problems": problems,
        }));
        return Ok(());
    }

    output::section("Market hash");
    output::field("Id", output::highlight(market_id));
    output::field("Pre-image", packed_params(&params));
    for problem in &problems {
        output::warning(problem);
    }
    Ok(())
}
