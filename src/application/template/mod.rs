//! Market templates: pre-filled parameters for common market shapes.

pub mod crypto;
pub mod sports;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::crypto::CryptoAsset;
use crate::domain::market::MarketParams;
use crate::domain::sports::Game;

pub use crypto::{
    crypto_description, crypto_primary_source, crypto_title, end_of_day, format_thousands,
    target_suggestions,
};
pub use sports::{
    format_resolution_requirements, resolution_window, resolve_game, sports_description,
    sports_max_deadline, sports_resolution_rules, sports_resolve_at, sports_title,
    GameResolution, ResolutionWindow,
};

/// Where a draft's parameters came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Manual,
    Sports,
    Crypto,
}

/// Number of outcomes the market presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketKind {
    Binary,
    Ternary,
}

/// Market parameters ready for review and creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketDraft {
    pub template: TemplateKind,
    pub kind: MarketKind,
    pub params: MarketParams,
}

impl MarketDraft {
    /// Game-winner market. The league is the category; draw-capable
    /// leagues produce a ternary market.
    #[must_use]
    pub fn from_game(game: &Game) -> Self {
        let primary_source = game
            .source_url
            .clone()
            .unwrap_or_else(|| format!("https://www.{}.com", game.league.code()));

        Self {
            template: TemplateKind::Sports,
            kind: if game.allows_draw {
                MarketKind::Ternary
            } else {
                MarketKind::Binary
            },
            params: MarketParams {
                category: game.league.to_string(),
                title: sports_title(game),
                resolve_at: sports_resolve_at(game).timestamp(),
                primary_source,
                rules: sports_description(game),
            },
        }
    }

    /// Price-target market resolving at the end of `date` (UTC).
    #[must_use]
    pub fn from_crypto(asset: &CryptoAsset, target: Decimal, date: NaiveDate) -> Self {
        Self {
            template: TemplateKind::Crypto,
            kind: MarketKind::Binary,
            params: MarketParams {
                category: "Crypto".to_string(),
                title: crypto_title(asset, target, date),
                resolve_at: end_of_day(date).timestamp(),
                primary_source: crypto_primary_source(asset),
                rules: crypto_description(asset, target, date),
            },
        }
    }

    #[must_use]
    pub fn manual(params: MarketParams) -> Self {
        Self {
            template: TemplateKind::Manual,
            kind: MarketKind::Binary,
            params,
        }
    }
}
