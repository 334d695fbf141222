use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use horizon::application::cache::DataCache;
use horizon::application::catalog::crypto::CryptoCatalog;
use horizon::application::catalog::sports::{SportsCatalog, SportsSettings};
use horizon::port::outbound::crypto::CryptoProvider;
use horizon::port::outbound::sports::SportsProvider;
use horizon::testkit::clock::ManualClock;
use horizon::testkit::provider::{ScriptedCryptoProvider, ScriptedSportsProvider};

/// Cache TTL used by catalog tests.
pub const TTL_SECS: i64 = 600;

pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn cache(clock: &Arc<ManualClock>) -> Arc<DataCache> {
    Arc::new(DataCache::with_clock(
        Duration::seconds(TTL_SECS),
        Arc::clone(clock) as _,
    ))
}

/// Catalog over `providers`, tried in the given order.
pub fn sports_catalog(
    providers: &[&Arc<ScriptedSportsProvider>],
    clock: &Arc<ManualClock>,
) -> SportsCatalog {
    let providers = providers
        .iter()
        .map(|p| Arc::clone(p) as Arc<dyn SportsProvider>)
        .collect();
    SportsCatalog::new(
        providers,
        cache(clock),
        Arc::clone(clock) as _,
        SportsSettings::default(),
    )
}

pub fn crypto_catalog(
    providers: &[&Arc<ScriptedCryptoProvider>],
    clock: &Arc<ManualClock>,
) -> CryptoCatalog {
    let providers = providers
        .iter()
        .map(|p| Arc::clone(p) as Arc<dyn CryptoProvider>)
        .collect();
    CryptoCatalog::new(providers, cache(clock))
}
