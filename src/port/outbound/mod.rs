//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as sports and
//! crypto data sources, the market contracts, IPFS and the local registry.

pub mod chain;
pub mod clock;
pub mod crypto;
pub mod evidence;
pub mod registry;
pub mod sports;
