//! Infrastructure configuration modules.

pub mod alerts;
pub mod dashboard;
pub mod database;
pub mod feed;
pub mod logging;
pub mod server;
pub mod settings;
pub mod speech;
