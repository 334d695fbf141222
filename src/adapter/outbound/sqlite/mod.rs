//! SQLite persistence for the created-markets registry (Diesel ORM).

pub mod database;
pub mod registry;

pub use database::connection::{create_pool, run_migrations, DbPool};
pub use registry::SqliteMarketRegistry;
