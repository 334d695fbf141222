//! Scripted data providers.
//!
//! Each provider returns what it was given, counts calls, and can be
//! switched into a failing mode to exercise fallback.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::crypto::CryptoAsset;
use crate::domain::sports::{DateRange, Game, GameStatus, League};
use crate::error::{ProviderError, Result};
use crate::port::outbound::crypto::CryptoProvider;
use crate::port::outbound::sports::SportsProvider;

fn unavailable(provider: &'static str) -> crate::error::Error {
    ProviderError::Status {
        provider,
        status: 503,
    }
    .into()
}

pub struct ScriptedSportsProvider {
    name: &'static str,
    games: Mutex<Vec<Game>>,
    status: Mutex<Option<GameStatus>>,
    failing: AtomicBool,
    calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl ScriptedSportsProvider {
    pub fn new(name: &'static str, games: Vec<Game>) -> Self {
        Self {
            name,
            games: Mutex::new(games),
            status: Mutex::new(None),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }

    /// A provider whose every call fails.
    pub fn failing(name: &'static str) -> Self {
        let provider = Self::new(name, Vec::new());
        provider.set_failing(true);
        provider
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_games(&self, games: Vec<Game>) {
        *self.games.lock() = games;
    }

    pub fn set_status(&self, status: GameStatus) {
        *self.status.lock() = Some(status);
    }

    /// Number of `upcoming_games` calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SportsProvider for ScriptedSportsProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn upcoming_games(&self, league: League, range: &DateRange) -> Result<Vec<Game>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable(self.name));
        }
        Ok(self
            .games
            .lock()
            .iter()
            .filter(|g| g.league == league && range.contains(g.starts_at))
            .cloned()
            .collect())
    }

    async fn game_status(&self, game: &Game) -> Result<Option<GameStatus>> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable(self.name));
        }
        Ok(self
            .status
            .lock()
            .clone()
            .filter(|status| status.game_id == game.id))
    }
}

pub struct ScriptedCryptoProvider {
    name: &'static str,
    assets: Mutex<Vec<CryptoAsset>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl ScriptedCryptoProvider {
    pub fn new(name: &'static str, assets: Vec<CryptoAsset>) -> Self {
        Self {
            name,
            assets: Mutex::new(assets),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        let provider = Self::new(name, Vec::new());
        provider.set_failing(true);
        provider
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `top_assets` calls, including those made by `search`.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CryptoProvider for ScriptedCryptoProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn top_assets(&self) -> Result<Vec<CryptoAsset>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable(self.name));
        }
        Ok(self.assets.lock().clone())
    }
}
