//! Leaderboard - sales leaderboard server and TV dashboard.
//!
//! Admins manage teams, agents, sales, announcements and cash offers over a
//! REST API. Every write is broadcast as a change event on a WebSocket feed.
//! A TV dashboard turns each team's monthly targets into catch-up adjusted daily
//! targets and speaks an alert when a team falls behind schedule.
//!
//! # Modules
//!
//! - [`domain`] - Pure types and computations: calendar, progress, targets, alerts
//! - [`port`] - Traits for storage, snapshot sources, speech, clocks and publishing
//! - [`adapter`] - SQLite and in-memory stores, speech back-ends, HTTP and
//!   WebSocket clients, the axum server and the CLI
//! - [`application`] - Admin service, target computation, invalidation
//!   routing and the dashboard scheduler
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use leaderboard::domain::{WeekendPolicy, WorkingDayCalendar};
//!
//! let calendar = WorkingDayCalendar::new(WeekendPolicy::SundayOnly).with_override(Some(10));
//! let days = calendar.working_days(NaiveDate::from_ymd_opt(2026, 9, 11).unwrap());
//! assert_eq!((days.remaining, days.total), (7, 10));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
