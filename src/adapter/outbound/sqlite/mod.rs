//! SQLite persistence adapter.
//!
//! Implements the store ports on top of Diesel with an r2d2 pool.

pub mod database;
pub mod store;

pub use database::connection::{create_pool, run_migrations, DbPool};
pub use store::SqliteStore;
