mod support;

use std::io::Write;

use alloy_primitives::Address;
use horizon::domain::evidence::ParsedOutcome;
use horizon::domain::protocol::MAX_EVIDENCE_SIZE;
use horizon::domain::resolution::{ResolutionInfo, ResolutionState};
use horizon::error::{ChainError, DomainError, Error};
use horizon::port::outbound::evidence::EvidenceStore;
use horizon::testkit::chain::SIGNER;
use horizon::testkit::domain::{market_id, market_params};

use support::catalog::utc;
use support::chain::ChainHarness;

fn with_market() -> (ChainHarness, horizon::domain::id::MarketId) {
    let harness = ChainHarness::new();
    let id = harness.chain.insert_event(
        &market_params("Lakers vs Celtics: Who wins?", utc(2025, 1, 3, 4)),
        Address::repeat_byte(0x11),
        Address::repeat_byte(0xaa),
    );
    harness.chain.set_resolution(
        id,
        ResolutionInfo {
            state: ResolutionState::Reportable,
            ..ResolutionInfo::default()
        },
    );
    (harness, id)
}

#[tokio::test]
async fn status_of_untouched_market_is_pending() {
    let harness = ChainHarness::new();
    let service = harness.resolution_service();

    let status = service.status(market_id(0x01)).await.unwrap();

    assert_eq!(status.info.state, ResolutionState::Pending);
    assert_eq!(status.label, "Pending");
    assert!(!status.can_report);
    assert!(!status.is_resolved);
}

#[tokio::test]
async fn report_pins_evidence_then_submits() {
    let (harness, id) = with_market();
    let service = harness.resolution_service();
    assert!(service.status(id).await.unwrap().can_report);

    let submission = service
        .report(
            id,
            true,
            "https://www.espn.com/nba/game/_/gameId/401",
            "LAL 112 - BOS 104",
            "Final score",
        )
        .await
        .unwrap();

    let documents = harness.evidence.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].event_id, id.to_string());
    assert_eq!(documents[0].parsed_outcome, ParsedOutcome::Yes);
    assert_eq!(documents[0].raw_value.as_deref(), Some("LAL 112 - BOS 104"));

    let status = service.status(id).await.unwrap();
    assert_eq!(status.info.state, ResolutionState::Reported);
    assert_eq!(status.info.reporter, Some(SIGNER));
    assert_eq!(status.info.reported_outcome, Some(true));
    assert_eq!(
        status.info.evidence_uri.as_deref(),
        Some(submission.evidence_uri.as_str())
    );
    assert!(status.can_dispute);
}

#[tokio::test]
async fn invalid_evidence_never_reaches_the_chain() {
    let (harness, id) = with_market();

    let result = harness
        .resolution_service()
        .report(id, false, "   ", "value", "")
        .await;

    assert!(matches!(
        result,
        Err(Error::Domain(DomainError::InvalidEvidence { .. }))
    ));
    assert!(harness.evidence.documents().is_empty());
    assert_eq!(harness.chain.transactions(), 0);
}

#[tokio::test]
async fn dispute_pins_counter_evidence() {
    let (harness, id) = with_market();
    let service = harness.resolution_service();
    service
        .report(id, true, "https://example.com/score", "112-104", "")
        .await
        .unwrap();

    let submission = service
        .dispute(
            id,
            "https://example.com/correction",
            "Score was corrected to 104-112",
            "League issued a correction",
        )
        .await
        .unwrap();

    let fetched = service
        .fetch_evidence(&submission.evidence_uri)
        .await
        .unwrap();
    assert_eq!(fetched.parsed_outcome, ParsedOutcome::Value);
    assert_eq!(fetched.source_url, "https://example.com/correction");

    let info = service.status(id).await.unwrap().info;
    assert_eq!(info.state, ResolutionState::Disputed);
    assert_eq!(info.disputer, Some(SIGNER));
    assert_eq!(
        info.dispute_reason.as_deref(),
        Some(submission.evidence_uri.as_str())
    );
}

#[tokio::test]
async fn arbiter_resolves_disputed_market() {
    let (harness, id) = with_market();
    let service = harness.resolution_service();
    service
        .report(id, true, "https://example.com/score", "112-104", "")
        .await
        .unwrap();
    service
        .dispute(id, "https://example.com/correction", "104-112", "")
        .await
        .unwrap();

    service.arbiter_resolve(id, false).await.unwrap();

    let status = service.status(id).await.unwrap();
    assert!(status.is_resolved);
    assert_eq!(status.info.final_outcome, Some(false));
    assert!(!status.info.is_invalid);
    assert_eq!(service.state(id).await.unwrap(), ResolutionState::Resolved);
}

#[tokio::test]
async fn invalidate_marks_market_invalid() {
    let (harness, id) = with_market();
    let service = harness.resolution_service();

    let receipt = service.invalidate(id).await.unwrap();

    assert!(receipt.tx_hash.starts_with("0x"));
    let info = service.status(id).await.unwrap().info;
    assert_eq!(info.state, ResolutionState::Resolved);
    assert!(info.is_invalid);
}

#[tokio::test]
async fn resolution_calls_on_unknown_market_fail() {
    let harness = ChainHarness::new();

    let result = harness
        .resolution_service()
        .arbiter_resolve(market_id(0x77), true)
        .await;

    assert!(matches!(
        result,
        Err(Error::Chain(ChainError::UnknownMarket { .. }))
    ));
}

#[tokio::test]
async fn fetch_evidence_for_unknown_uri_fails() {
    let harness = ChainHarness::new();

    let result = harness
        .resolution_service()
        .fetch_evidence("ipfs://QmMissing")
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn oversized_files_are_rejected() {
    let harness = ChainHarness::new();
    let mut small = tempfile::NamedTempFile::new().unwrap();
    small.write_all(b"screenshot").unwrap();
    let mut large = tempfile::NamedTempFile::new().unwrap();
    let limit = usize::try_from(MAX_EVIDENCE_SIZE).unwrap();
    large.write_all(&vec![0u8; limit + 1]).unwrap();

    let uri = harness.evidence.upload_file(small.path()).await.unwrap();
    assert!(uri.starts_with("ipfs://"));
    assert!(matches!(
        harness.evidence.upload_file(large.path()).await,
        Err(Error::Evidence(_))
    ));
}
