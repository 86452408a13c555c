//! Persistence ports for leaderboard entities.

use async_trait::async_trait;

use crate::domain::{
    Agent, AgentId, Announcement, AnnouncementId, CashOffer, CashOfferId, Sale, SaleId, Team,
    TeamId,
};
use crate::error::Result;

/// Storage operations for teams.
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Insert a new team.
    async fn insert_team(&self, team: &Team) -> Result<()>;

    /// Replace an existing team. Returns false if it does not exist.
    async fn update_team(&self, team: &Team) -> Result<bool>;

    /// Delete a team by ID. Returns false if it did not exist.
    async fn delete_team(&self, id: &TeamId) -> Result<bool>;

    /// Get a team by ID.
    async fn get_team(&self, id: &TeamId) -> Result<Option<Team>>;

    /// List all teams, ordered by name.
    async fn list_teams(&self) -> Result<Vec<Team>>;
}

/// Storage operations for agents.
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// Insert a new agent.
    async fn insert_agent(&self, agent: &Agent) -> Result<()>;

    /// Replace an agent's name and team. Counters are owned by sale operations.
    async fn update_agent(&self, agent: &Agent) -> Result<bool>;

    /// Delete an agent and its sales. Returns false if it did not exist.
    async fn delete_agent(&self, id: &AgentId) -> Result<bool>;

    /// Get an agent by ID.
    async fn get_agent(&self, id: &AgentId) -> Result<Option<Agent>>;

    /// List all agents, ordered by name.
    async fn list_agents(&self) -> Result<Vec<Agent>>;

    /// Number of agents assigned to a team.
    async fn count_agents_in_team(&self, team_id: &TeamId) -> Result<usize>;
}

/// Storage operations for sales.
///
/// Implementations keep the owning agent's running counters in step with
/// inserts and deletes, atomically with the sale row itself.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Record a sale and add it to the agent's counters.
    async fn insert_sale(&self, sale: &Sale) -> Result<()>;

    /// Delete a sale and subtract it from the agent's counters.
    ///
    /// Returns the deleted sale, or `None` if it did not exist.
    async fn delete_sale(&self, id: &SaleId) -> Result<Option<Sale>>;

    /// Most recent sales first, optionally for one agent.
    async fn list_sales(&self, agent_id: Option<&AgentId>, limit: usize) -> Result<Vec<Sale>>;
}

/// Storage operations for announcements.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    async fn insert_announcement(&self, announcement: &Announcement) -> Result<()>;

    async fn update_announcement(&self, announcement: &Announcement) -> Result<bool>;

    async fn delete_announcement(&self, id: &AnnouncementId) -> Result<bool>;

    async fn get_announcement(&self, id: &AnnouncementId) -> Result<Option<Announcement>>;

    /// Newest first; only active ones when `active_only`.
    async fn list_announcements(&self, active_only: bool) -> Result<Vec<Announcement>>;
}

/// Storage operations for cash offers.
#[async_trait]
pub trait CashOfferStore: Send + Sync {
    async fn insert_cash_offer(&self, offer: &CashOffer) -> Result<()>;

    async fn update_cash_offer(&self, offer: &CashOffer) -> Result<bool>;

    async fn delete_cash_offer(&self, id: &CashOfferId) -> Result<bool>;

    async fn get_cash_offer(&self, id: &CashOfferId) -> Result<Option<CashOffer>>;

    /// Newest first; only active ones when `active_only`.
    async fn list_cash_offers(&self, active_only: bool) -> Result<Vec<CashOffer>>;
}

/// Everything the leaderboard persists.
pub trait Store: TeamStore + AgentStore + SaleStore + AnnouncementStore + CashOfferStore {}

impl<T> Store for T where
    T: TeamStore + AgentStore + SaleStore + AnnouncementStore + CashOfferStore
{
}
