//! Ordered provider fallback.
//!
//! Each call walks the provider list once. Errors are logged and skipped,
//! and running out of providers yields an empty list rather than an error.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::Result;

/// Try `providers` in order and return the first non-empty success.
///
/// An empty result counts as "try the next one". When every provider
/// errors or comes back empty the result is an empty `Vec`.
pub async fn first_non_empty<P, T, F, Fut>(providers: &[P], mut op: F) -> Vec<T>
where
    P: ProviderName,
    F: FnMut(&P) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    for provider in providers {
        match op(provider).await {
            Ok(items) if !items.is_empty() => {
                debug!(provider = provider.provider_name(), count = items.len(), "Provider hit");
                return items;
            }
            Ok(_) => {
                debug!(provider = provider.provider_name(), "Provider returned nothing");
            }
            Err(e) => {
                warn!(provider = provider.provider_name(), error = %e, "Provider failed, trying next");
            }
        }
    }
    Vec::new()
}

/// Try `providers` in order and return the first success, even if empty.
///
/// `None` when every provider errors.
pub async fn first_ok<P, T, F, Fut>(providers: &[P], mut op: F) -> Option<T>
where
    P: ProviderName,
    F: FnMut(&P) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for provider in providers {
        match op(provider).await {
            Ok(value) => return Some(value),
            Err(e) => {
                warn!(provider = provider.provider_name(), error = %e, "Provider failed, trying next");
            }
        }
    }
    None
}

/// Name shown in fallback logs.
pub trait ProviderName {
    fn provider_name(&self) -> &'static str;
}

impl ProviderName for std::sync::Arc<dyn crate::port::outbound::sports::SportsProvider> {
    fn provider_name(&self) -> &'static str {
        self.name()
    }
}

impl ProviderName for std::sync::Arc<dyn crate::port::outbound::crypto::CryptoProvider> {
    fn provider_name(&self) -> &'static str {
        self.name()
    }
}
