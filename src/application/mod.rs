//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod cache;
pub mod catalog;
pub mod create;
pub mod dedup;
pub mod fallback;
pub mod market;
pub mod resolution;
pub mod template;
pub mod wallet;
