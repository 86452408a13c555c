//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for teams, agents and sales, plus seeded stores.
//! - [`fake`] - Test doubles for ports: clocks and a recording speech engine.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod fake;

pub use fake::{FixedClock, RecordingSpeech, TokioClock};
