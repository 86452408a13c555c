//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (databases, speech engines, remote servers, etc.).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Store   │            │  Snapshot   │              │  Speech   │
//! │ Adapter │            │  Source     │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`Store`] - Persistence for teams, agents, sales, announcements and cash offers
//! - [`SnapshotSource`] - Team/agent snapshots for the dashboard computation
//! - [`SpeechSynthesizer`] - Spoken lagging-team alerts
//! - [`ChangePublisher`] - Entity-change fan-out to live clients
//! - [`Clock`] - Local wall-clock time

pub mod outbound;

pub use outbound::clock::{Clock, SystemClock};
pub use outbound::publisher::ChangePublisher;
pub use outbound::snapshot::{Snapshot, SnapshotSource};
pub use outbound::speech::{SpeechError, SpeechSynthesizer, Utterance, Voice};
pub use outbound::store::{
    AgentStore, AnnouncementStore, CashOfferStore, SaleStore, Store, TeamStore,
};
