//! Outbound adapters (driven side).

pub mod feed;
pub mod http;
pub mod memory;
pub mod speech;
pub mod sqlite;
