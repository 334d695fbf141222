//! Miette diagnostics for CLI error presentation.
//!
//! Config parse failures are rendered against the file contents with a
//! labeled span.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(horizon::config))]
pub struct ConfigError {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build from a TOML parse failure, pointing at the offending bytes.
    ///
    /// Returns `None` when the parser reported no location.
    #[must_use]
    pub fn from_toml(err: &toml::de::Error, src: &str) -> Option<Self> {
        let span = err.span()?;
        let len = span.end.saturating_sub(span.start).max(1);
        Some(
            Self::new(err.message(), src, span.start, len)
                .with_help("see config.toml.example for every supported key"),
        )
    }
}

/// A command needed a signing wallet.
#[derive(Debug, Error, Diagnostic)]
#[error("no signing wallet configured")]
#[diagnostic(
    code(horizon::wallet),
    help("set WALLET_PRIVATE_KEY in the environment or a .env file")
)]
pub struct WalletError;
