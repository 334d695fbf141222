//! Infrastructure configuration modules.

pub mod chain;
pub mod data;
pub mod ipfs;
pub mod logging;
pub mod settings;
pub mod wallet;

pub use settings::Config;
