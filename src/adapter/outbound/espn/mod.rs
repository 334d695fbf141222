//! ESPN scoreboard adapter.

mod client;
pub mod dto;

pub use client::EspnClient;
