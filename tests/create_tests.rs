mod support;

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use chrono::NaiveDate;
use horizon::application::dedup::{check_duplicate, market_hash};
use horizon::application::template::MarketDraft;
use horizon::domain::error::DomainError;
use horizon::domain::money::MAX_USDC_AMOUNT;
use horizon::error::{ChainError, CreateError, Error};
use horizon::port::outbound::registry::MarketRegistry;
use horizon::testkit::chain::{FakeChain, FACTORY, SIGNER};
use horizon::testkit::domain::{asset, market_params};
use rust_decimal_macros::dec;

use support::catalog::utc;
use support::chain::ChainHarness;

fn funded() -> ChainHarness {
    let harness = ChainHarness::new();
    harness.fund(dec!(1000));
    harness
}

#[tokio::test]
async fn required_amounts_add_bond_and_liquidity() {
    let harness = funded();
    let amounts = harness
        .create_service()
        .required_amounts(dec!(250))
        .await
        .unwrap();

    assert_eq!(amounts.create_bond, dec!(10));
    assert_eq!(amounts.liquidity, dec!(250));
    assert_eq!(amounts.total, dec!(260));
}

#[tokio::test]
async fn required_amounts_reject_overflowing_total() {
    let harness = ChainHarness {
        chain: Arc::new(FakeChain::default().with_create_bond(U256::MAX)),
        ..ChainHarness::new()
    };

    let err = harness
        .create_service()
        .required_amounts(MAX_USDC_AMOUNT)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Domain(DomainError::InvalidAmount { .. })
    ));
}

#[tokio::test]
async fn create_sends_event_and_records_it() {
    let harness = funded();
    harness.allow(FACTORY, dec!(110));
    let params = market_params("Will BTC price reach ≥ $100,000?", utc(2025, 2, 1, 0));

    let receipt = harness
        .create_service()
        .create(&params, dec!(100))
        .await
        .unwrap();

    assert_eq!(receipt.market_id, market_hash(&params));
    assert_eq!(
        receipt.amm_address,
        Some(Address::from_word(receipt.market_id.as_b256()))
    );

    let created = harness.chain.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].description, params.rules);
    assert_eq!(created[0].rule_bytes, params.rules.as_bytes());
    assert_eq!(created[0].initial_liquidity, U256::from(100_000_000u64));
    assert_eq!(created[0].resolve_at, 1_738_368_000);

    let recorded = harness.registry.list().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].id, receipt.market_id);
    assert_eq!(recorded[0].creator, SIGNER);
    assert_eq!(recorded[0].title, params.title);
    assert_eq!(recorded[0].amm_address, receipt.amm_address);
}

#[tokio::test]
async fn create_from_crypto_template() {
    let harness = funded();
    harness.allow(FACTORY, dec!(60));
    let btc = asset("bitcoin", "btc", "Bitcoin", 94_321.0);
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let draft = MarketDraft::from_crypto(&btc, dec!(100000), date);

    let receipt = harness
        .create_service()
        .create(&draft.params, dec!(50))
        .await
        .unwrap();

    assert_eq!(receipt.market_id, market_hash(&draft.params));
    assert_eq!(harness.chain.created()[0].category, "Crypto");
}

#[tokio::test]
async fn duplicate_is_rejected_before_sending() {
    let harness = funded();
    harness.allow(FACTORY, dec!(1000));
    let params = market_params("Will ETH flip BTC?", utc(2025, 6, 1, 0));
    harness
        .chain
        .insert_event(&params, Address::repeat_byte(0x11), Address::repeat_byte(0x22));

    let result = harness.create_service().create(&params, dec!(100)).await;

    match result {
        Err(Error::Create(CreateError::Duplicate { market_id })) => {
            assert_eq!(market_id, market_hash(&params).to_string());
        }
        other => panic!("expected duplicate error, got {other:?}"),
    }
    assert_eq!(harness.chain.transactions(), 0);
}

#[tokio::test]
async fn duplicate_check_ignores_formatting() {
    let harness = funded();
    let params = market_params("Will ETH flip BTC?", utc(2025, 6, 1, 0));
    harness
        .chain
        .insert_event(&params, Address::repeat_byte(0x11), Address::repeat_byte(0x22));

    let mut restyled = params.clone();
    restyled.title = "  WILL eth   flip btc?  ".to_string();
    let check = check_duplicate(harness.chain.as_ref(), &restyled)
        .await
        .unwrap();

    assert!(check.is_duplicate);
    assert_eq!(check.existing_amm_address, Some(Address::repeat_byte(0x22)));

    let mut other = params;
    other.resolve_at += 1;
    let check = check_duplicate(harness.chain.as_ref(), &other).await.unwrap();
    assert!(!check.is_duplicate);
    assert_eq!(check.existing_amm_address, None);
}

#[tokio::test]
async fn low_allowance_is_rejected_before_sending() {
    let harness = funded();
    harness.allow(FACTORY, dec!(109.99));
    let params = market_params("Will SOL reach $500?", utc(2025, 3, 1, 0));

    let result = harness.create_service().create(&params, dec!(100)).await;

    match result {
        Err(Error::Create(CreateError::AllowanceTooLow {
            allowance,
            required,
        })) => {
            assert_eq!(allowance, dec!(109.99));
            assert_eq!(required, dec!(110));
        }
        other => panic!("expected allowance error, got {other:?}"),
    }
    assert!(harness.chain.created().is_empty());
}

#[tokio::test]
async fn unlimited_allowance_reads_as_bogus() {
    let harness = funded();
    harness.allow_units(FACTORY, U256::MAX);
    let params = market_params("Will SOL reach $500?", utc(2025, 3, 1, 0));

    let result = harness.create_service().create(&params, dec!(100)).await;

    assert!(matches!(
        result,
        Err(Error::Create(CreateError::AllowanceTooLow { .. }))
    ));
}

#[tokio::test]
async fn approve_grants_exact_total_then_create_succeeds() {
    let harness = funded();
    let service = harness.create_service();
    let params = market_params("Will SOL reach $500?", utc(2025, 3, 1, 0));
    let required = service.required_amounts(dec!(40)).await.unwrap();

    service.approve(required.total).await.unwrap();

    assert_eq!(
        harness.chain.approvals(),
        vec![(FACTORY, U256::from(50_000_000u64))]
    );
    assert!(service.create(&params, dec!(40)).await.is_ok());
    assert_eq!(service.factory_allowance().await.unwrap(), U256::ZERO);
}

#[tokio::test]
async fn invalid_params_list_every_problem() {
    let harness = funded();
    harness.allow(FACTORY, dec!(1000));
    let mut params = market_params("", utc(2025, 1, 1, 0));
    params.rules = "   ".to_string();

    let result = harness.create_service().create(&params, dec!(10)).await;

    match result {
        Err(Error::Create(CreateError::InvalidParams { errors })) => {
            assert_eq!(errors.len(), 3);
            assert!(errors.contains(&"Title is required".to_string()));
            assert!(errors.contains(&"Rules are required".to_string()));
        }
        other => panic!("expected invalid params, got {other:?}"),
    }
}

#[tokio::test]
async fn resolve_time_needs_an_hour_of_lead() {
    let harness = funded();
    harness.allow(FACTORY, dec!(1000));
    let params = market_params("Too soon", utc(2025, 1, 1, 1));

    assert!(matches!(
        harness.create_service().create(&params, dec!(10)).await,
        Err(Error::Create(CreateError::InvalidParams { .. }))
    ));

    let params = market_params("Soon enough", utc(2025, 1, 1, 2));
    assert!(harness.create_service().create(&params, dec!(10)).await.is_ok());
}

#[tokio::test]
async fn create_requires_a_wallet() {
    let harness = funded();
    let service = harness.create_service_for(None);
    let params = market_params("No wallet", utc(2025, 3, 1, 0));

    assert!(matches!(
        service.create(&params, dec!(10)).await,
        Err(Error::Chain(ChainError::WalletNotConfigured))
    ));
    assert!(matches!(
        service.onchain_markets().await,
        Err(Error::Chain(ChainError::WalletNotConfigured))
    ));
}

#[tokio::test]
async fn created_and_onchain_markets() {
    let harness = funded();
    harness.allow(FACTORY, dec!(1000));
    let service = harness.create_service();
    let first = market_params("First", utc(2025, 3, 1, 0));
    let second = market_params("Second", utc(2025, 3, 2, 0));
    harness.chain.insert_event(
        &market_params("Someone else", utc(2025, 3, 3, 0)),
        Address::repeat_byte(0x11),
        Address::repeat_byte(0x22),
    );

    let a = service.create(&first, dec!(10)).await.unwrap();
    harness.clock.advance(chrono::Duration::minutes(5));
    let b = service.create(&second, dec!(10)).await.unwrap();

    let local: Vec<_> = service
        .created_markets()
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(local, vec![b.market_id, a.market_id]);

    let mut onchain = service.onchain_markets().await.unwrap();
    onchain.sort_by_key(|id| id.to_string());
    let mut expected = vec![a.market_id, b.market_id];
    expected.sort_by_key(|id| id.to_string());
    assert_eq!(onchain, expected);
}

#[tokio::test]
async fn reverted_create_is_not_recorded() {
    let harness = funded();
    harness.allow(FACTORY, dec!(1000));
    harness.chain.revert_next();
    let params = market_params("Reverts", utc(2025, 3, 1, 0));

    let result = harness.create_service().create(&params, dec!(10)).await;

    assert!(matches!(
        result,
        Err(Error::Chain(ChainError::Reverted { .. }))
    ));
    assert!(harness.registry.list().unwrap().is_empty());
}
