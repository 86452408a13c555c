//! Leaderboard domain: entities and the pure computations over them.
//!
//! Nothing in this module performs I/O. The dashboard computation is a
//! pipeline of pure functions:
//!
//! 1. [`calendar`] counts working days for today.
//! 2. [`progress`] sums agent counters per team.
//! 3. [`target`] redistributes each team's shortfall over the remaining days.
//! 4. [`alert`] decides which lagging teams to announce, with a per-team cooldown.

pub mod agent;
pub mod alert;
pub mod announcement;
pub mod calendar;
pub mod cash_offer;
pub mod change;
pub mod error;
pub mod id;
pub mod money;
pub mod progress;
pub mod sale;
pub mod target;
pub mod team;

pub use agent::{Agent, AgentUpdate, NewAgent};
pub use alert::{AlertDispatcher, AlertPolicy, LaggingAlert};
pub use announcement::{Announcement, AnnouncementUpdate, NewAnnouncement};
pub use calendar::{WeekendPolicy, WorkingDayCalendar, WorkingDays};
pub use cash_offer::{CashOffer, CashOfferUpdate, NewCashOffer};
pub use change::{Celebration, ChangeAction, ChangeEvent};
pub use error::DomainError;
pub use id::{AgentId, AnnouncementId, CashOfferId, SaleId, TeamId};
pub use progress::{LeaderboardEntry, TeamProgress, TeamProgressEntry};
pub use sale::{NewSale, Sale};
pub use target::{DailyTarget, DimensionTarget};
pub use team::{NewTeam, Team, TeamUpdate};
