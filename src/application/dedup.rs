//! Market content hashing and pre-flight validation.
//!
//! The hash must match the event factory byte for byte: each string field
//! is normalized, then the fields are joined with `|` in a fixed order and
//! hashed with keccak256.

use alloy_primitives::{keccak256, Address};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::domain::id::MarketId;
use crate::domain::market::{MarketParams, PartialMarketParams};
use crate::domain::protocol::MIN_RESOLVE_LEAD_SECS;
use crate::error::Result;
use crate::port::outbound::chain::EventFactory;

/// Whitespace as the factory's normalizer sees it: JavaScript's `\s`.
/// That is Unicode `White_Space` without U+0085, plus U+FEFF.
#[must_use]
pub fn is_hash_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// Trim, lowercase and collapse whitespace runs to a single space.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .split(is_hash_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The pre-image fed to keccak256.
#[must_use]
pub fn packed_params(params: &MarketParams) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        normalize(&params.category),
        normalize(&params.title),
        params.resolve_at,
        normalize(&params.primary_source),
        normalize(&params.rules),
    )
}

/// Canonical content hash of a market.
#[must_use]
pub fn market_hash(params: &MarketParams) -> MarketId {
    MarketId::new(keccak256(packed_params(params).as_bytes()))
}

/// Check partially filled parameters, collecting every problem.
///
/// # Errors
///
/// Returns the list of human-readable problems when any field is invalid.
pub fn validate_market_params(
    params: &PartialMarketParams,
    now: DateTime<Utc>,
) -> std::result::Result<(), Vec<String>> {
    let blank = |field: &Option<String>| field.as_deref().map_or(true, |s| s.trim().is_empty());
    let mut errors = Vec::new();

    if blank(&params.category) {
        errors.push("Category is required".to_string());
    }
    if blank(&params.title) {
        errors.push("Title is required".to_string());
    }
    let earliest = now.timestamp() + MIN_RESOLVE_LEAD_SECS;
    if params.resolve_at.map_or(true, |at| at <= earliest) {
        errors.push("Resolve time must be at least 1 hour in the future".to_string());
    }
    if blank(&params.primary_source) {
        errors.push("Primary source is required".to_string());
    }
    if blank(&params.rules) {
        errors.push("Rules are required".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Outcome of an on-chain duplicate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCheck {
    pub market_id: MarketId,
    pub is_duplicate: bool,
    pub existing_amm_address: Option<Address>,
}

/// Hash `params` and ask the factory whether that event already exists.
///
/// # Errors
///
/// Returns an error if the factory cannot be queried.
pub async fn check_duplicate(
    factory: &dyn EventFactory,
    params: &MarketParams,
) -> Result<DuplicateCheck> {
    let market_id = market_hash(params);
    let event = factory.get_event(market_id).await?;
    let is_duplicate = event.exists();
    debug!(market_id = %market_id, is_duplicate, "Duplicate check");

    Ok(DuplicateCheck {
        market_id,
        is_duplicate,
        existing_amm_address: if is_duplicate { event.amm() } else { None },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn params() -> MarketParams {
        MarketParams {
            category: "Sports".into(),
            title: "Lakers vs Celtics: Who wins?".into(),
            resolve_at: 1_800_000_000,
            primary_source: "https://www.espn.com/nba/game/_/gameId/1".into(),
            rules: "Home team wins.".into(),
        }
    }

    #[test]
    fn normalize_trims_lowercases_and_collapses() {
        assert_eq!(normalize("  Hello \t\n  World  "), "hello world");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_uses_javascript_whitespace() {
        assert_eq!(normalize("\u{FEFF}BTC\u{FEFF}"), "btc");
        assert_eq!(normalize("a\u{FEFF}b"), "a b");
        assert_eq!(normalize("a\u{85}b"), "a\u{85}b");
        assert_eq!(normalize("\u{3000}a\u{2028}\u{A0}b\u{202F}"), "a b");
    }

    #[test]
    fn hash_matches_known_vector() {
        assert_eq!(
            packed_params(&params()),
            "sports|lakers vs celtics: who wins?|1800000000|https://www.espn.com/nba/game/_/gameid/1|home team wins."
        );
        assert_eq!(
            market_hash(&params()).to_string(),
            "0xc2cacf43ed76ff7f54fb6a7e12bfc13a680f5f96b1ffab8851e9a25414177ec3"
        );
    }

    #[test]
    fn hash_matches_known_vector_with_unicode_whitespace() {
        let params = MarketParams {
            category: "\u{FEFF}Crypto".into(),
            title: "Will BTC\u{85}reach  ≥ $100,000?\u{3000}".into(),
            resolve_at: 1_738_367_999,
            primary_source: "https://www.coingecko.com/en/coins/bitcoin ".into(),
            rules: "YES if\tthe price\u{FEFF}reaches the target.".into(),
        };

        assert_eq!(
            packed_params(&params),
            "crypto|will btc\u{85}reach ≥ $100,000?|1738367999|https://www.coingecko.com/en/coins/bitcoin|yes if the price reaches the target."
        );
        assert_eq!(
            market_hash(&params).to_string(),
            "0x5a9fd8000c97c250280866b0f30502bad8f6f15f4193b0deda10de6f46e70889"
        );
    }

    #[test]
    fn packed_params_uses_pipe_delimited_order() {
        assert_eq!(
            packed_params(&params()),
            "sports|lakers vs celtics: who wins?|1800000000|https://www.espn.com/nba/game/_/gameid/1|home team wins."
        );
    }

    #[test]
    fn hash_is_keccak_of_packed_string() {
        let expected = keccak256(packed_params(&params()).as_bytes());
        assert_eq!(market_hash(&params()).as_b256(), expected);
    }

    #[test]
    fn hash_ignores_case_and_whitespace() {
        let mut noisy = params();
        noisy.title = "  LAKERS   vs\tCeltics:  who WINS? ".into();
        noisy.category = "SPORTS".into();
        assert_eq!(market_hash(&noisy), market_hash(&params()));
    }

    #[test]
    fn hash_changes_with_resolve_time() {
        let mut later = params();
        later.resolve_at += 1;
        assert_ne!(market_hash(&later), market_hash(&params()));
    }

    #[test]
    fn validation_collects_every_error() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let errors = validate_market_params(&PartialMarketParams::default(), now).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Category is required",
                "Title is required",
                "Resolve time must be at least 1 hour in the future",
                "Primary source is required",
                "Rules are required",
            ]
        );
    }

    #[test]
    fn validation_requires_strictly_more_than_an_hour() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut partial = PartialMarketParams::from(params());

        partial.resolve_at = Some(now.timestamp() + 3600);
        assert!(validate_market_params(&partial, now).is_err());

        partial.resolve_at = Some(now.timestamp() + 3601);
        assert!(validate_market_params(&partial, now).is_ok());
    }

    #[test]
    fn validation_treats_blank_strings_as_missing() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut partial = PartialMarketParams::from(params());
        partial.rules = Some("   ".into());
        let errors = validate_market_params(&partial, now).unwrap_err();
        assert_eq!(errors, vec!["Rules are required"]);
    }
}
