//! Evidence storage port (IPFS pinning).

use std::path::Path;

use async_trait::async_trait;

use crate::domain::evidence::EvidenceData;
use crate::error::Result;

/// Content-addressed storage for resolution evidence.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Pin an evidence document and return its `ipfs://` URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the evidence is invalid or the upload fails.
    async fn upload(&self, evidence: &EvidenceData) -> Result<String>;

    /// Pin a file (screenshot, archived page) and return its `ipfs://` URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is too large, unreadable, or the upload fails.
    async fn upload_file(&self, path: &Path) -> Result<String>;

    /// Retrieve and validate an evidence document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or is not valid evidence.
    async fn fetch(&self, uri: &str) -> Result<EvidenceData>;
}
