//! Reference data catalogs used by the template generators.

pub mod crypto;
pub mod sports;

pub use crypto::CryptoCatalog;
pub use sports::{GameResolutionInfo, SportsCatalog, SportsSettings};
