//! REST and WebSocket server.
//!
//! Routes admin CRUD to the leaderboard service, serves the dashboard read
//! models and streams change events on `/ws`.

pub mod agents;
pub mod announcements;
pub mod cash_offers;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod sales;
pub mod state;
pub mod teams;
pub mod ws;

pub use router::{router, serve};
pub use state::AppState;
