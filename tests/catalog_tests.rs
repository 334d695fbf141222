mod support;

use std::sync::Arc;

use chrono::Duration;
use horizon::domain::sports::{DateRange, Game, GameState, GameStatus, League, RangePreset};
use horizon::port::outbound::clock::Clock;
use horizon::testkit::clock::ManualClock;
use horizon::testkit::domain::{asset, game, top_assets};
use horizon::testkit::provider::{ScriptedCryptoProvider, ScriptedSportsProvider};

use support::catalog::{crypto_catalog, sports_catalog, utc, TTL_SECS};

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::at(utc(2025, 1, 1, 0)))
}

fn next_week(clock: &ManualClock) -> DateRange {
    DateRange::upcoming(clock.now(), 7)
}

fn lakers_celtics() -> Game {
    game(League::Nba, "401", utc(2025, 1, 3, 0), "Lakers", "Celtics")
}

#[tokio::test]
async fn sports_falls_back_when_first_provider_fails() {
    let clock = clock();
    let espn = Arc::new(ScriptedSportsProvider::failing("espn"));
    let nba = Arc::new(ScriptedSportsProvider::new("nba", vec![lakers_celtics()]));
    let catalog = sports_catalog(&[&espn, &nba], &clock);

    let games = catalog
        .upcoming_games(League::Nba, Some(next_week(&clock)))
        .await;

    assert_eq!(games, vec![lakers_celtics()]);
    assert_eq!(espn.calls(), 1);
    assert_eq!(nba.calls(), 1);
}

#[tokio::test]
async fn sports_skips_provider_with_empty_result() {
    let clock = clock();
    let nfl_only = game(League::Nfl, "9", utc(2025, 1, 4, 18), "Chiefs", "Bills");
    let espn = Arc::new(ScriptedSportsProvider::new("espn", vec![nfl_only]));
    let fixtures = Arc::new(ScriptedSportsProvider::new("fixtures", vec![lakers_celtics()]));
    let catalog = sports_catalog(&[&espn, &fixtures], &clock);

    let games = catalog
        .upcoming_games(League::Nba, Some(next_week(&clock)))
        .await;

    assert_eq!(games.len(), 1);
    assert_eq!(games[0].home, "Lakers");
    assert_eq!(espn.calls(), 1);
    assert_eq!(fixtures.calls(), 1);
}

#[tokio::test]
async fn sports_stops_at_first_non_empty_provider() {
    let clock = clock();
    let espn = Arc::new(ScriptedSportsProvider::new("espn", vec![lakers_celtics()]));
    let nba = Arc::new(ScriptedSportsProvider::new("nba", vec![lakers_celtics()]));
    let catalog = sports_catalog(&[&espn, &nba], &clock);

    catalog
        .upcoming_games(League::Nba, Some(next_week(&clock)))
        .await;

    assert_eq!(espn.calls(), 1);
    assert_eq!(nba.calls(), 0);
}

#[tokio::test]
async fn sports_results_are_cached_until_ttl() {
    let clock = clock();
    let espn = Arc::new(ScriptedSportsProvider::new("espn", vec![lakers_celtics()]));
    let catalog = sports_catalog(&[&espn], &clock);
    let range = next_week(&clock);

    catalog.upcoming_games(League::Nba, Some(range)).await;
    catalog.upcoming_games(League::Nba, Some(range)).await;
    assert_eq!(espn.calls(), 1);

    clock.advance(Duration::seconds(TTL_SECS - 1));
    catalog.upcoming_games(League::Nba, Some(range)).await;
    assert_eq!(espn.calls(), 1);

    clock.advance(Duration::seconds(2));
    catalog.upcoming_games(League::Nba, Some(range)).await;
    assert_eq!(espn.calls(), 2);
}

#[tokio::test]
async fn sports_cache_is_keyed_by_league() {
    let clock = clock();
    let espn = Arc::new(ScriptedSportsProvider::new(
        "espn",
        vec![
            lakers_celtics(),
            game(League::Nfl, "9", utc(2025, 1, 4, 18), "Chiefs", "Bills"),
        ],
    ));
    let catalog = sports_catalog(&[&espn], &clock);
    let range = next_week(&clock);

    let nba = catalog.upcoming_games(League::Nba, Some(range)).await;
    let nfl = catalog.upcoming_games(League::Nfl, Some(range)).await;

    assert_eq!(nba[0].home, "Lakers");
    assert_eq!(nfl[0].home, "Chiefs");
    assert_eq!(espn.calls(), 2);
}

#[tokio::test]
async fn sports_empty_results_are_not_cached() {
    let clock = clock();
    let espn = Arc::new(ScriptedSportsProvider::failing("espn"));
    let catalog = sports_catalog(&[&espn], &clock);
    let range = next_week(&clock);

    assert!(catalog
        .upcoming_games(League::Nba, Some(range))
        .await
        .is_empty());

    espn.set_failing(false);
    espn.set_games(vec![lakers_celtics()]);
    let games = catalog.upcoming_games(League::Nba, Some(range)).await;

    assert_eq!(games.len(), 1);
    assert_eq!(espn.calls(), 2);
}

#[tokio::test]
async fn sports_force_refresh_bypasses_cache() {
    let clock = clock();
    let espn = Arc::new(ScriptedSportsProvider::new("espn", vec![lakers_celtics()]));
    let catalog = sports_catalog(&[&espn], &clock);

    assert_eq!(catalog.upcoming_games(League::Nba, None).await.len(), 1);

    let late = game(League::Nba, "402", utc(2025, 1, 5, 1), "Knicks", "Heat");
    espn.set_games(vec![lakers_celtics(), late]);
    assert_eq!(catalog.upcoming_games(League::Nba, None).await.len(), 1);
    assert_eq!(catalog.force_refresh(League::Nba).await.len(), 2);
    assert_eq!(espn.calls(), 2);
}

#[tokio::test]
async fn sports_default_range_uses_configured_days() {
    let clock = clock();
    let in_range = game(League::Nba, "1", utc(2025, 1, 10, 0), "Lakers", "Celtics");
    let out_of_range = game(League::Nba, "2", utc(2025, 1, 12, 0), "Knicks", "Heat");
    let espn = Arc::new(ScriptedSportsProvider::new(
        "espn",
        vec![in_range.clone(), out_of_range],
    ));
    let catalog = sports_catalog(&[&espn], &clock);

    assert_eq!(catalog.upcoming_games(League::Nba, None).await, vec![in_range]);
}

#[test]
fn range_validation_uses_configured_maximum() {
    let clock = clock();
    let catalog = sports_catalog(&[], &clock);

    assert!(catalog
        .validate_range(&DateRange::upcoming(utc(2025, 1, 1, 0), 30))
        .is_ok());
    assert!(catalog
        .validate_range(&DateRange::upcoming(utc(2025, 1, 1, 0), 31))
        .is_err());
    assert!(catalog
        .validate_range(&DateRange::new(utc(2025, 1, 2, 0), utc(2025, 1, 1, 0)))
        .is_err());
    assert!(catalog
        .validate_range(&catalog.preset(RangePreset::Next14Days))
        .is_ok());
}

#[test]
fn games_inside_minimum_lead_are_too_soon() {
    let clock = clock();
    let catalog = sports_catalog(&[], &clock);
    let soon = game(League::Nba, "1", utc(2025, 1, 1, 1), "Lakers", "Celtics");
    let later = game(League::Nba, "2", utc(2025, 1, 1, 4), "Knicks", "Heat");

    assert!(catalog.is_game_too_soon(&soon));
    assert!(!catalog.is_game_too_soon(&later));
    assert!(catalog.time_info(&later).is_soon);
}

#[tokio::test]
async fn resolution_info_reports_final_winner() {
    let clock = Arc::new(ManualClock::at(utc(2025, 1, 3, 4)));
    let game = lakers_celtics();
    let espn = Arc::new(ScriptedSportsProvider::failing("espn"));
    let nba = Arc::new(ScriptedSportsProvider::new("nba", Vec::new()));
    nba.set_status(GameStatus {
        game_id: game.id.clone(),
        state: GameState::Final,
        home_score: Some(112),
        away_score: Some(104),
        last_updated: utc(2025, 1, 3, 3),
        source: "nba".to_string(),
    });
    let catalog = sports_catalog(&[&espn, &nba], &clock);

    let info = catalog.resolution_info(&game).await;

    assert!(info.window.can_resolve);
    let resolution = info.resolution.expect("resolution");
    assert!(resolution.can_resolve);
    assert_eq!(resolution.home_wins, Some(true));
    assert_eq!(espn.status_calls(), 1);
    assert_eq!(nba.status_calls(), 1);
}

#[tokio::test]
async fn resolution_info_blocks_ties_and_unfinished_games() {
    let clock = Arc::new(ManualClock::at(utc(2025, 1, 2, 23)));
    let game = lakers_celtics();
    let espn = Arc::new(ScriptedSportsProvider::new("espn", Vec::new()));
    espn.set_status(GameStatus {
        game_id: game.id.clone(),
        state: GameState::InProgress,
        home_score: Some(50),
        away_score: Some(48),
        last_updated: utc(2025, 1, 2, 23),
        source: "espn".to_string(),
    });
    let catalog = sports_catalog(&[&espn], &clock);

    let info = catalog.resolution_info(&game).await;
    assert!(!info.window.can_resolve);
    assert!(!info.resolution.expect("resolution").can_resolve);

    espn.set_status(GameStatus {
        game_id: game.id.clone(),
        state: GameState::Final,
        home_score: Some(100),
        away_score: Some(100),
        last_updated: utc(2025, 1, 3, 3),
        source: "espn".to_string(),
    });
    let tie = catalog.resolution_info(&game).await.resolution.expect("resolution");
    assert!(!tie.can_resolve);
    assert_eq!(tie.home_wins, None);
}

#[tokio::test]
async fn resolution_info_without_status() {
    let clock = clock();
    let espn = Arc::new(ScriptedSportsProvider::failing("espn"));
    let catalog = sports_catalog(&[&espn], &clock);

    let info = catalog.resolution_info(&lakers_celtics()).await;

    assert!(info.status.is_none());
    assert!(info.resolution.is_none());
}

#[tokio::test]
async fn crypto_falls_back_and_caches() {
    let clock = clock();
    let coingecko = Arc::new(ScriptedCryptoProvider::failing("coingecko"));
    let fixtures = Arc::new(ScriptedCryptoProvider::new("fixtures", top_assets()));
    let catalog = crypto_catalog(&[&coingecko, &fixtures], &clock);

    assert_eq!(catalog.top_assets().await.len(), 3);
    assert_eq!(catalog.top_assets().await.len(), 3);
    assert_eq!(coingecko.calls(), 1);
    assert_eq!(fixtures.calls(), 1);

    catalog.clear_cache();
    coingecko.set_failing(false);
    assert_eq!(catalog.top_assets().await.len(), 3);
    assert_eq!(fixtures.calls(), 2);
}

#[tokio::test]
async fn crypto_total_failure_is_empty_and_uncached() {
    let clock = clock();
    let coingecko = Arc::new(ScriptedCryptoProvider::failing("coingecko"));
    let catalog = crypto_catalog(&[&coingecko], &clock);

    assert!(catalog.top_assets().await.is_empty());
    assert!(catalog.top_assets().await.is_empty());
    assert_eq!(coingecko.calls(), 2);
}

#[tokio::test]
async fn crypto_search_matches_symbol_or_name() {
    let clock = clock();
    let coingecko = Arc::new(ScriptedCryptoProvider::new(
        "coingecko",
        vec![
            asset("bitcoin", "btc", "Bitcoin", 94_321.0),
            asset("bitcoin-cash", "bch", "Bitcoin Cash", 450.0),
            asset("ethereum", "eth", "Ethereum", 3_300.0),
        ],
    ));
    let catalog = crypto_catalog(&[&coingecko], &clock);

    let hits = catalog.search("BITCOIN").await;
    assert_eq!(hits.len(), 2);
    assert_eq!(catalog.search("eth").await[0].symbol, "eth");

    catalog.search("bitcoin").await;
    assert_eq!(coingecko.calls(), 2);
}

#[tokio::test]
async fn crypto_search_caches_empty_answers() {
    let clock = clock();
    let coingecko = Arc::new(ScriptedCryptoProvider::new("coingecko", top_assets()));
    let catalog = crypto_catalog(&[&coingecko], &clock);

    assert!(catalog.search("doge").await.is_empty());
    assert!(catalog.search("doge").await.is_empty());
    assert_eq!(coingecko.calls(), 1);
}
