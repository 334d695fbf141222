//! Domain types for prediction markets, sports games and crypto assets.
//!
//! Nothing in here performs I/O.

pub mod crypto;
pub mod error;
pub mod evidence;
pub mod id;
pub mod market;
pub mod money;
pub mod protocol;
pub mod resolution;
pub mod sports;

pub use crypto::{filter_assets, CryptoAsset};
pub use error::DomainError;
pub use evidence::{EvidenceData, ParsedOutcome};
pub use id::{AssetId, GameId, MarketId};
pub use market::{
    EventInfo, MarketParams, MarketReserves, MarketSnapshot, PartialMarketParams, TradeQuote,
    TradeSide, UserPosition, CATEGORIES,
};
pub use resolution::{ResolutionInfo, ResolutionState};
pub use sports::{DateRange, Game, GameState, GameStatus, GameTimeInfo, League, RangePreset};
