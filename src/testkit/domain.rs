//! Builders for domain primitives used across tests.

use alloy_primitives::B256;
use chrono::{DateTime, Utc};

use crate::domain::crypto::CryptoAsset;
use crate::domain::id::{AssetId, GameId, MarketId};
use crate::domain::market::MarketParams;
use crate::domain::sports::{Game, League};

/// A game with ESPN-style id and source link.
pub fn game(league: League, id: &str, starts_at: DateTime<Utc>, home: &str, away: &str) -> Game {
    Game {
        id: GameId::new(format!("{}_{id}", league.code())),
        league,
        starts_at,
        home: home.to_string(),
        away: away.to_string(),
        venue: Some("Test Arena".to_string()),
        source_url: Some(format!(
            "https://www.espn.com/{}/game/_/gameId/{id}",
            league.code()
        )),
        allows_draw: league.allows_draw(),
    }
}

pub fn asset(id: &str, symbol: &str, name: &str, price: f64) -> CryptoAsset {
    CryptoAsset {
        id: AssetId::new(id),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image: String::new(),
        current_price: price,
        market_cap: price * 1_000_000.0,
    }
}

/// Bitcoin, Ethereum and Solana.
pub fn top_assets() -> Vec<CryptoAsset> {
    vec![
        asset("bitcoin", "btc", "Bitcoin", 94_321.0),
        asset("ethereum", "eth", "Ethereum", 3_300.0),
        asset("solana", "sol", "Solana", 190.0),
    ]
}

/// Complete, valid parameters resolving at `resolve_at`.
pub fn market_params(title: &str, resolve_at: DateTime<Utc>) -> MarketParams {
    MarketParams {
        category: "Crypto".to_string(),
        title: title.to_string(),
        resolve_at: resolve_at.timestamp(),
        primary_source: "https://www.coingecko.com/en/coins/bitcoin".to_string(),
        rules: "Resolves YES if the price reaches the target.".to_string(),
    }
}

/// A market id filled with one repeated byte.
pub fn market_id(byte: u8) -> MarketId {
    MarketId::new(B256::repeat_byte(byte))
}
