//! Reporting, disputing and arbitrating market outcomes.
//!
//! Reports and disputes pin an evidence document first and submit its URI.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::evidence::{EvidenceData, ParsedOutcome};
use crate::domain::id::MarketId;
use crate::domain::resolution::{ResolutionInfo, ResolutionState};
use crate::error::Result;
use crate::port::outbound::chain::{ResolutionManager, TxReceipt};
use crate::port::outbound::evidence::EvidenceStore;

/// Resolution record plus the actions currently open.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionStatus {
    pub info: ResolutionInfo,
    pub label: &'static str,
    pub can_report: bool,
    pub can_dispute: bool,
    pub is_resolved: bool,
}

impl From<ResolutionInfo> for ResolutionStatus {
    fn from(info: ResolutionInfo) -> Self {
        let state = info.state;
        Self {
            info,
            label: state.label(),
            can_report: state.can_report(),
            can_dispute: state.can_dispute(),
            is_resolved: state.is_resolved(),
        }
    }
}

/// A submitted report or dispute with the pinned evidence URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceSubmission {
    pub evidence_uri: String,
    pub tx_hash: String,
}

pub struct ResolutionService {
    manager: Arc<dyn ResolutionManager>,
    evidence: Arc<dyn EvidenceStore>,
}

impl ResolutionService {
    pub fn new(manager: Arc<dyn ResolutionManager>, evidence: Arc<dyn EvidenceStore>) -> Self {
        Self { manager, evidence }
    }

    /// # Errors
    ///
    /// Returns an error if the contract read fails.
    pub async fn state(&self, id: MarketId) -> Result<ResolutionState> {
        self.manager.state(id).await
    }

    /// # Errors
    ///
    /// Returns an error if the contract read fails.
    pub async fn status(&self, id: MarketId) -> Result<ResolutionStatus> {
        Ok(self.manager.resolution(id).await?.into())
    }

    /// Pin YES/NO evidence and report `outcome`.
    ///
    /// # Errors
    ///
    /// Returns an error if the evidence is invalid, the upload fails, or
    /// the transaction fails.
    pub async fn report(
        &self,
        id: MarketId,
        outcome: bool,
        source_url: &str,
        raw_value: &str,
        notes: &str,
    ) -> Result<EvidenceSubmission> {
        let evidence = EvidenceData::new(
            id.to_string(),
            source_url,
            raw_value,
            ParsedOutcome::from(outcome),
            notes,
        );
        let evidence_uri = self.evidence.upload(&evidence).await?;
        info!(market_id = %id, outcome, evidence_uri = %evidence_uri, "Reporting outcome");

        let receipt = self.manager.report(id, outcome, &evidence_uri).await?;
        Ok(EvidenceSubmission {
            evidence_uri,
            tx_hash: receipt.tx_hash,
        })
    }

    /// Pin counter-evidence and dispute the current report.
    ///
    /// # Errors
    ///
    /// Returns an error if the evidence is invalid, the upload fails, or
    /// the transaction fails.
    pub async fn dispute(
        &self,
        id: MarketId,
        reason_url: &str,
        counter_evidence: &str,
        notes: &str,
    ) -> Result<EvidenceSubmission> {
        let evidence = EvidenceData::new(
            id.to_string(),
            reason_url,
            counter_evidence,
            ParsedOutcome::Value,
            notes,
        );
        let reason_uri = self.evidence.upload(&evidence).await?;
        info!(market_id = %id, reason_uri = %reason_uri, "Disputing report");

        let receipt = self.manager.dispute(id, &reason_uri).await?;
        Ok(EvidenceSubmission {
            evidence_uri: reason_uri,
            tx_hash: receipt.tx_hash,
        })
    }

    /// Arbiter only.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn arbiter_resolve(&self, id: MarketId, outcome: bool) -> Result<TxReceipt> {
        info!(market_id = %id, outcome, "Arbiter resolving");
        self.manager.arbiter_resolve(id, outcome).await
    }

    /// Arbiter only.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn invalidate(&self, id: MarketId) -> Result<TxReceipt> {
        info!(market_id = %id, "Invalidating market");
        self.manager.invalidate(id).await
    }

    /// Retrieve the evidence document behind a URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or is invalid.
    pub async fn fetch_evidence(&self, uri: &str) -> Result<EvidenceData> {
        self.evidence.fetch(uri).await
    }
}
