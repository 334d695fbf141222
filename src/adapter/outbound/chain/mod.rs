//! On-chain adapter for the market protocol contracts.

mod abi;
mod client;

pub use client::{ChainClient, ContractAddresses};
