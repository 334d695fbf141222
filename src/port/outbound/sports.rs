//! Sports schedule port.

use async_trait::async_trait;

use crate::domain::sports::{DateRange, Game, GameStatus, League};
use crate::error::{ProviderError, Result};

/// A source of scheduled games.
///
/// Providers are tried in order by the sports catalog; an error or an
/// empty result moves on to the next one.
#[async_trait]
pub trait SportsProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Games for `league` starting within `range`.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be reached or decoded.
    async fn upcoming_games(&self, league: League, range: &DateRange) -> Result<Vec<Game>>;

    /// Live status of a single game. `Ok(None)` means the game was not found.
    ///
    /// # Errors
    ///
    /// The default implementation reports the operation as unsupported.
    async fn game_status(&self, _game: &Game) -> Result<Option<GameStatus>> {
        Err(ProviderError::Unsupported {
            provider: self.name(),
            what: "live game status".into(),
        }
        .into())
    }
}
