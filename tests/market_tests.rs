mod support;

use alloy_primitives::{Address, U256};
use horizon::application::market::MarketService;
use horizon::domain::market::{MarketReserves, TradeSide};
use horizon::error::{ChainError, Error};
use horizon::testkit::chain::{FACTORY, SIGNER};
use horizon::testkit::domain::{market_id, market_params};
use rust_decimal_macros::dec;

use support::catalog::utc;
use support::chain::ChainHarness;

const AMM: Address = Address::repeat_byte(0xaa);

fn with_market() -> (ChainHarness, horizon::domain::id::MarketId) {
    let harness = ChainHarness::new();
    harness.fund(dec!(500));
    let id = harness.chain.insert_event(
        &market_params("Will BTC close above $100k?", utc(2025, 2, 1, 0)),
        Address::repeat_byte(0x11),
        AMM,
    );
    harness.chain.set_reserves(
        AMM,
        MarketReserves {
            yes_reserve: U256::from(30_000_000u64),
            no_reserve: U256::from(70_000_000u64),
            liquidity_usd: U256::from(100_000_000u64),
            volume_usd: U256::ZERO,
            total_lp_supply: U256::from(100_000_000u64),
        },
    );
    (harness, id)
}

#[tokio::test]
async fn snapshot_combines_event_reserves_and_position() {
    let (harness, id) = with_market();

    let snapshot = harness.market_service().snapshot(id).await.unwrap();

    assert_eq!(snapshot.event.market_id, id);
    assert_eq!(snapshot.event.amm(), Some(AMM));
    assert_eq!(snapshot.yes_probability_bps(), 3_000);
    assert_eq!(snapshot.position, Some(Default::default()));
    assert_eq!(snapshot.user_lp_share(), 0.0);
}

#[tokio::test]
async fn snapshot_of_unknown_market_fails() {
    let harness = ChainHarness::new();

    let result = harness.market_service().snapshot(market_id(0x42)).await;

    assert!(matches!(
        result,
        Err(Error::Chain(ChainError::UnknownMarket { .. }))
    ));
}

#[tokio::test]
async fn market_without_amm_cannot_trade() {
    let harness = ChainHarness::new();
    harness.fund(dec!(100));
    let id = harness.chain.insert_event(
        &market_params("No pool yet", utc(2025, 2, 1, 0)),
        Address::repeat_byte(0x11),
        Address::ZERO,
    );

    let result = harness.market_service().buy(id, TradeSide::Yes, dec!(5)).await;

    assert!(matches!(result, Err(Error::Chain(ChainError::NoAmm { .. }))));
    assert_eq!(harness.chain.transactions(), 0);
}

#[tokio::test]
async fn buy_spends_allowance_granted_to_the_amm() {
    let (harness, id) = with_market();
    let service = harness.market_service();
    assert_eq!(service.spender(id).await.unwrap(), AMM);

    harness
        .wallet_service()
        .approve(AMM, Some(dec!(25)))
        .await
        .unwrap();
    service.buy(id, TradeSide::No, dec!(25)).await.unwrap();

    let position = harness.chain.position(AMM);
    assert_eq!(position.no_tokens, U256::from(25_000_000u64));
    assert_eq!(position.yes_tokens, U256::ZERO);
    assert_eq!(
        harness.wallet_service().allowance(AMM).await.unwrap(),
        U256::ZERO
    );
    assert_eq!(harness.wallet_service().balance().await.unwrap(), dec!(475));
}

#[tokio::test]
async fn buy_without_allowance_reverts() {
    let (harness, id) = with_market();

    let result = harness
        .market_service()
        .buy(id, TradeSide::Yes, dec!(10))
        .await;

    assert!(matches!(
        result,
        Err(Error::Chain(ChainError::Reverted { .. }))
    ));
}

#[tokio::test]
async fn liquidity_mints_lp_tokens() {
    let (harness, id) = with_market();
    harness.allow(AMM, dec!(100));

    harness
        .market_service()
        .provide_liquidity(id, dec!(100))
        .await
        .unwrap();

    let snapshot = harness.market_service().snapshot(id).await.unwrap();
    assert_eq!(
        snapshot.position.map(|p| p.lp_tokens),
        Some(U256::from(100_000_000u64))
    );
    assert!((snapshot.user_lp_share() - 50.0).abs() < f64::EPSILON);
}

#[test]
fn quote_is_a_flat_estimate() {
    let quote = MarketService::quote(TradeSide::Yes, dec!(10));

    assert_eq!(quote.tokens_out, U256::from(10_000_000u64));
    assert_eq!(quote.fee, U256::from(100_000u64));
}

#[tokio::test]
async fn wallet_reads_balance_and_allowances() {
    let harness = ChainHarness::new();
    harness.fund(dec!(1234.5));
    harness.allow(FACTORY, dec!(60));
    let wallet = harness.wallet_service();

    assert_eq!(wallet.owner().unwrap(), SIGNER);
    assert_eq!(wallet.balance().await.unwrap(), dec!(1234.5));
    assert_eq!(
        wallet.allowance(FACTORY).await.unwrap(),
        U256::from(60_000_000u64)
    );
    assert_eq!(wallet.decimals().await.unwrap(), 6);
}

#[tokio::test]
async fn wallet_approve_without_amount_is_unlimited() {
    let harness = ChainHarness::new();

    harness
        .wallet_service()
        .approve(FACTORY, None)
        .await
        .unwrap();

    assert_eq!(harness.chain.approvals(), vec![(FACTORY, U256::MAX)]);
}
