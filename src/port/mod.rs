//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! Adapters implement them to integrate with data providers, the chain,
//! IPFS and local storage.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Data   │            │   Chain     │              │  Evidence │
//! │Providers│            │  Contracts  │              │  / Store  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod outbound;
