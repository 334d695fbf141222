//! Infrastructure layer.
//!
//! Configuration loading and the composition root that wires adapters into
//! application services.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
