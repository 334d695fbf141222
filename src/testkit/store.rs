//! In-memory evidence store and market registry.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::evidence::EvidenceData;
use crate::domain::id::MarketId;
use crate::domain::protocol::MAX_EVIDENCE_SIZE;
use crate::error::{Error, Result};
use crate::port::outbound::evidence::EvidenceStore;
use crate::port::outbound::registry::{CreatedMarket, MarketRegistry};

/// Pins documents in a map under sequential fake CIDs.
#[derive(Default)]
pub struct MemoryEvidenceStore {
    documents: Mutex<HashMap<String, EvidenceData>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pinned evidence document.
    pub fn documents(&self) -> Vec<EvidenceData> {
        self.documents.lock().values().cloned().collect()
    }

    /// Store `evidence` under `uri` without validation.
    pub fn insert(&self, uri: &str, evidence: EvidenceData) {
        self.documents.lock().insert(uri.to_string(), evidence);
    }

    fn next_uri(&self) -> String {
        let n = self.documents.lock().len() + self.files.lock().len();
        format!("ipfs://QmTestEvidence{n:04}")
    }
}

#[async_trait]
impl EvidenceStore for MemoryEvidenceStore {
    async fn upload(&self, evidence: &EvidenceData) -> Result<String> {
        evidence.validate()?;
        let uri = self.next_uri();
        self.documents.lock().insert(uri.clone(), evidence.clone());
        Ok(uri)
    }

    async fn upload_file(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        if bytes.len() as u64 > MAX_EVIDENCE_SIZE {
            return Err(Error::Evidence(format!(
                "file is {} bytes, limit is {MAX_EVIDENCE_SIZE}",
                bytes.len()
            )));
        }
        let uri = self.next_uri();
        self.files.lock().insert(uri.clone(), bytes);
        Ok(uri)
    }

    async fn fetch(&self, uri: &str) -> Result<EvidenceData> {
        let evidence = self
            .documents
            .lock()
            .get(uri)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("evidence {uri}")))?;
        evidence.validate()?;
        Ok(evidence)
    }
}

/// Registry kept in memory, ordered like the SQLite one.
#[derive(Default)]
pub struct MemoryRegistry {
    markets: Mutex<HashMap<MarketId, CreatedMarket>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarketRegistry for MemoryRegistry {
    fn record(&self, market: &CreatedMarket) -> Result<()> {
        self.markets.lock().insert(market.id, market.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<CreatedMarket>> {
        let mut markets: Vec<CreatedMarket> = self.markets.lock().values().cloned().collect();
        markets.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
        });
        Ok(markets)
    }

    fn get(&self, id: &MarketId) -> Result<Option<CreatedMarket>> {
        Ok(self.markets.lock().get(id).cloned())
    }
}
