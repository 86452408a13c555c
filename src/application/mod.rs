//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod broadcast;
pub mod dashboard;
pub mod invalidation;
pub mod leaderboard;
pub mod scheduler;
