//! Admin use cases: CRUD over the store with change publishing.
//!
//! Every successful write publishes a [`ChangeEvent`] so connected
//! dashboards can refresh. Recording a sale additionally publishes a
//! [`Celebration`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::progress::{rank_agents, team_progress_entries};
use crate::domain::{
    Agent, AgentId, AgentUpdate, Announcement, AnnouncementId, AnnouncementUpdate, CashOffer,
    CashOfferId, CashOfferUpdate, Celebration, ChangeAction, ChangeEvent, DomainError,
    LeaderboardEntry, NewAgent, NewAnnouncement, NewCashOffer, NewSale, NewTeam, Sale, SaleId,
    Team, TeamId, TeamProgressEntry, TeamUpdate,
};
use crate::error::{Error, Result};
use crate::port::{ChangePublisher, Snapshot, Store};

/// Number of sales returned when no limit is given.
pub const DEFAULT_SALES_LIMIT: usize = 50;
/// Upper bound on a requested sales page.
pub const MAX_SALES_LIMIT: usize = 500;

/// Leaderboard admin service.
#[derive(Clone)]
pub struct LeaderboardService {
    store: Arc<dyn Store>,
    publisher: Arc<dyn ChangePublisher>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, publisher: Arc<dyn ChangePublisher>) -> Self {
        Self { store, publisher }
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }

    fn publish(&self, event: ChangeEvent) {
        debug!(kind = event.kind(), "Publishing change");
        self.publisher.publish(event);
    }

    async fn ensure_team_exists(&self, team_id: Option<&TeamId>) -> Result<()> {
        let Some(team_id) = team_id else {
            return Ok(());
        };
        if self.store.get_team(team_id).await?.is_none() {
            return Err(DomainError::UnknownReference {
                entity: "team",
                id: team_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    // Teams

    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        self.store.list_teams().await
    }

    pub async fn get_team(&self, id: &TeamId) -> Result<Team> {
        self.store
            .get_team(id)
            .await?
            .ok_or_else(|| Error::not_found("team", id))
    }

    pub async fn create_team(&self, input: NewTeam) -> Result<Team> {
        let team = input.into_team()?;
        self.store.insert_team(&team).await?;
        info!(team_id = %team.id, name = %team.name, "Team created");
        self.publish(ChangeEvent::Team {
            action: ChangeAction::Created,
            id: team.id.clone(),
        });
        Ok(team)
    }

    pub async fn update_team(&self, id: &TeamId, update: TeamUpdate) -> Result<Team> {
        let mut team = self.get_team(id).await?;
        team.apply(update)?;
        if !self.store.update_team(&team).await? {
            return Err(Error::not_found("team", id));
        }
        self.publish(ChangeEvent::Team {
            action: ChangeAction::Updated,
            id: team.id.clone(),
        });
        Ok(team)
    }

    /// Delete a team. Rejected while agents are still assigned to it.
    pub async fn delete_team(&self, id: &TeamId) -> Result<()> {
        let agents = self.store.count_agents_in_team(id).await?;
        if agents > 0 {
            return Err(DomainError::TeamInUse {
                team_id: id.to_string(),
                agents,
            }
            .into());
        }
        if !self.store.delete_team(id).await? {
            return Err(Error::not_found("team", id));
        }
        info!(team_id = %id, "Team deleted");
        self.publish(ChangeEvent::Team {
            action: ChangeAction::Deleted,
            id: id.clone(),
        });
        Ok(())
    }

    // Agents

    pub async fn list_agents(&self) -> Result<Vec<Agent>> {
        self.store.list_agents().await
    }

    pub async fn get_agent(&self, id: &AgentId) -> Result<Agent> {
        self.store
            .get_agent(id)
            .await?
            .ok_or_else(|| Error::not_found("agent", id))
    }

    pub async fn create_agent(&self, input: NewAgent) -> Result<Agent> {
        let agent = input.into_agent()?;
        self.ensure_team_exists(agent.team_id.as_ref()).await?;
        self.store.insert_agent(&agent).await?;
        info!(agent_id = %agent.id, name = %agent.name, "Agent created");
        self.publish(ChangeEvent::Agent {
            action: ChangeAction::Created,
            id: agent.id.clone(),
        });
        Ok(agent)
    }

    pub async fn update_agent(&self, id: &AgentId, update: AgentUpdate) -> Result<Agent> {
        let mut agent = self.get_agent(id).await?;
        agent.apply(update)?;
        self.ensure_team_exists(agent.team_id.as_ref()).await?;
        if !self.store.update_agent(&agent).await? {
            return Err(Error::not_found("agent", id));
        }
        self.publish(ChangeEvent::Agent {
            action: ChangeAction::Updated,
            id: agent.id.clone(),
        });
        Ok(agent)
    }

    pub async fn delete_agent(&self, id: &AgentId) -> Result<()> {
        if !self.store.delete_agent(id).await? {
            return Err(Error::not_found("agent", id));
        }
        info!(agent_id = %id, "Agent deleted");
        self.publish(ChangeEvent::Agent {
            action: ChangeAction::Deleted,
            id: id.clone(),
        });
        Ok(())
    }

    // Sales

    /// Most recent sales, newest first. `limit` is clamped to
    /// `1..=MAX_SALES_LIMIT`.
    pub async fn list_sales(&self, agent_id: Option<&AgentId>, limit: Option<usize>) -> Result<Vec<Sale>> {
        let limit = limit
            .unwrap_or(DEFAULT_SALES_LIMIT)
            .clamp(1, MAX_SALES_LIMIT);
        self.store.list_sales(agent_id, limit).await
    }

    /// Record a sale against an agent and celebrate it.
    pub async fn record_sale(&self, input: NewSale) -> Result<Sale> {
        let sale = input.into_sale()?;
        let agent = self.store.get_agent(&sale.agent_id).await?.ok_or_else(|| {
            Error::from(DomainError::UnknownReference {
                entity: "agent",
                id: sale.agent_id.to_string(),
            })
        })?;
        self.store.insert_sale(&sale).await?;

        let team_name = match &agent.team_id {
            Some(team_id) => self.store.get_team(team_id).await?.map(|t| t.name),
            None => None,
        };
        info!(
            sale_id = %sale.id,
            agent = %agent.name,
            amount = %sale.amount,
            units = sale.units,
            "Sale recorded"
        );

        self.publish(ChangeEvent::sale(ChangeAction::Created, &sale));
        self.publish(ChangeEvent::Celebration(Celebration {
            agent_id: agent.id,
            agent_name: agent.name,
            team_name,
            amount: sale.amount,
            units: sale.units,
        }));
        Ok(sale)
    }

    pub async fn delete_sale(&self, id: &SaleId) -> Result<Sale> {
        let sale = self
            .store
            .delete_sale(id)
            .await?
            .ok_or_else(|| Error::not_found("sale", id))?;
        info!(sale_id = %sale.id, amount = %sale.amount, "Sale deleted");
        self.publish(ChangeEvent::sale(ChangeAction::Deleted, &sale));
        Ok(sale)
    }

    // Announcements

    pub async fn list_announcements(&self, active_only: bool) -> Result<Vec<Announcement>> {
        self.store.list_announcements(active_only).await
    }

    pub async fn create_announcement(&self, input: NewAnnouncement) -> Result<Announcement> {
        let announcement = input.into_announcement()?;
        self.store.insert_announcement(&announcement).await?;
        self.publish(ChangeEvent::Announcement {
            action: ChangeAction::Created,
            id: announcement.id.clone(),
        });
        Ok(announcement)
    }

    pub async fn update_announcement(
        &self,
        id: &AnnouncementId,
        update: AnnouncementUpdate,
    ) -> Result<Announcement> {
        let mut announcement = self
            .store
            .get_announcement(id)
            .await?
            .ok_or_else(|| Error::not_found("announcement", id))?;
        announcement.apply(update)?;
        if !self.store.update_announcement(&announcement).await? {
            return Err(Error::not_found("announcement", id));
        }
        self.publish(ChangeEvent::Announcement {
            action: ChangeAction::Updated,
            id: announcement.id.clone(),
        });
        Ok(announcement)
    }

    pub async fn delete_announcement(&self, id: &AnnouncementId) -> Result<()> {
        if !self.store.delete_announcement(id).await? {
            return Err(Error::not_found("announcement", id));
        }
        self.publish(ChangeEvent::Announcement {
            action: ChangeAction::Deleted,
            id: id.clone(),
        });
        Ok(())
    }

    // Cash offers

    pub async fn list_cash_offers(&self, active_only: bool) -> Result<Vec<CashOffer>> {
        self.store.list_cash_offers(active_only).await
    }

    pub async fn get_cash_offer(&self, id: &CashOfferId) -> Result<CashOffer> {
        self.store
            .get_cash_offer(id)
            .await?
            .ok_or_else(|| Error::not_found("cash offer", id))
    }

    pub async fn create_cash_offer(&self, input: NewCashOffer) -> Result<CashOffer> {
        let offer = input.into_cash_offer()?;
        self.store.insert_cash_offer(&offer).await?;
        info!(offer_id = %offer.id, amount = %offer.amount, "Cash offer created");
        self.publish(ChangeEvent::CashOffer {
            action: ChangeAction::Created,
            id: offer.id.clone(),
        });
        Ok(offer)
    }

    pub async fn update_cash_offer(
        &self,
        id: &CashOfferId,
        update: CashOfferUpdate,
    ) -> Result<CashOffer> {
        let mut offer = self.get_cash_offer(id).await?;
        offer.apply(update)?;
        if !self.store.update_cash_offer(&offer).await? {
            return Err(Error::not_found("cash offer", id));
        }
        self.publish(ChangeEvent::CashOffer {
            action: ChangeAction::Updated,
            id: offer.id.clone(),
        });
        Ok(offer)
    }

    pub async fn delete_cash_offer(&self, id: &CashOfferId) -> Result<()> {
        if !self.store.delete_cash_offer(id).await? {
            return Err(Error::not_found("cash offer", id));
        }
        self.publish(ChangeEvent::CashOffer {
            action: ChangeAction::Deleted,
            id: id.clone(),
        });
        Ok(())
    }

    // Read models

    pub async fn snapshot(&self) -> Result<Snapshot> {
        let teams = self.store.list_teams().await?;
        let agents = self.store.list_agents().await?;
        Ok(Snapshot { teams, agents })
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let snapshot = self.snapshot().await?;
        Ok(rank_agents(&snapshot.agents, &snapshot.teams))
    }

    pub async fn team_progress(&self) -> Result<Vec<TeamProgressEntry>> {
        let snapshot = self.snapshot().await?;
        Ok(team_progress_entries(&snapshot.teams, &snapshot.agents))
    }
}
