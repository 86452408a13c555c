//! In-memory store implementation.
//!
//! Used by tests and by `serve --memory`. All tables sit behind one lock so
//! a sale and its agent's counters change together.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::domain::{
    Agent, AgentId, Announcement, AnnouncementId, CashOffer, CashOfferId, DomainError, Sale,
    SaleId, Team, TeamId,
};
use crate::error::{Error, Result};
use crate::port::{AgentStore, AnnouncementStore, CashOfferStore, SaleStore, TeamStore};

#[derive(Debug, Default)]
struct Tables {
    teams: HashMap<TeamId, Team>,
    agents: HashMap<AgentId, Agent>,
    sales: HashMap<SaleId, Sale>,
    announcements: HashMap<AnnouncementId, Announcement>,
    cash_offers: HashMap<CashOfferId, CashOffer>,
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn insert_team(&self, team: &Team) -> Result<()> {
        self.tables.write().teams.insert(team.id.clone(), team.clone());
        Ok(())
    }

    async fn update_team(&self, team: &Team) -> Result<bool> {
        let mut tables = self.tables.write();
        match tables.teams.get_mut(&team.id) {
            Some(existing) => {
                *existing = team.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_team(&self, id: &TeamId) -> Result<bool> {
        let mut tables = self.tables.write();
        let agents = tables.agents.values().filter(|a| a.is_member_of(id)).count();
        if agents > 0 {
            return Err(DomainError::TeamInUse {
                team_id: id.to_string(),
                agents,
            }
            .into());
        }
        Ok(tables.teams.remove(id).is_some())
    }

    async fn get_team(&self, id: &TeamId) -> Result<Option<Team>> {
        Ok(self.tables.read().teams.get(id).cloned())
    }

    async fn list_teams(&self) -> Result<Vec<Team>> {
        let mut teams: Vec<Team> = self.tables.read().teams.values().cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }
}

#[async_trait]
impl AgentStore for MemoryStore {
    async fn insert_agent(&self, agent: &Agent) -> Result<()> {
        self.tables
            .write()
            .agents
            .insert(agent.id.clone(), agent.clone());
        Ok(())
    }

    async fn update_agent(&self, agent: &Agent) -> Result<bool> {
        let mut tables = self.tables.write();
        match tables.agents.get_mut(&agent.id) {
            Some(existing) => {
                existing.name = agent.name.clone();
                existing.team_id = agent.team_id.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_agent(&self, id: &AgentId) -> Result<bool> {
        let mut tables = self.tables.write();
        let removed = tables.agents.remove(id).is_some();
        if removed {
            tables.sales.retain(|_, sale| &sale.agent_id != id);
        }
        Ok(removed)
    }

    async fn get_agent(&self, id: &AgentId) -> Result<Option<Agent>> {
        Ok(self.tables.read().agents.get(id).cloned())
    }

    async fn list_agents(&self) -> Result<Vec<Agent>> {
        let mut agents: Vec<Agent> = self.tables.read().agents.values().cloned().collect();
        agents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(agents)
    }

    async fn count_agents_in_team(&self, team_id: &TeamId) -> Result<usize> {
        Ok(self
            .tables
            .read()
            .agents
            .values()
            .filter(|a| a.is_member_of(team_id))
            .count())
    }
}

/// An agent's counters after adding `volume` and `units`, or an error when
/// either would overflow. The agent is left untouched on error.
fn adjusted_counters(agent: &Agent, volume: Decimal, units: i64) -> Result<(Decimal, i64)> {
    match (
        agent.current_volume.checked_add(volume),
        agent.current_units.checked_add(units),
    ) {
        (Some(volume), Some(units)) => Ok((volume, units)),
        _ => Err(DomainError::CounterOverflow {
            agent_id: agent.id.to_string(),
        }
        .into()),
    }
}

#[async_trait]
impl SaleStore for MemoryStore {
    async fn insert_sale(&self, sale: &Sale) -> Result<()> {
        let mut tables = self.tables.write();
        let agent = tables
            .agents
            .get_mut(&sale.agent_id)
            .ok_or_else(|| Error::not_found("agent", &sale.agent_id))?;
        let (volume, units) = adjusted_counters(agent, sale.amount, sale.units)?;
        agent.current_volume = volume;
        agent.current_units = units;
        tables.sales.insert(sale.id.clone(), sale.clone());
        Ok(())
    }

    async fn delete_sale(&self, id: &SaleId) -> Result<Option<Sale>> {
        let mut tables = self.tables.write();
        let Some(sale) = tables.sales.get(id).cloned() else {
            return Ok(None);
        };
        if let Some(agent) = tables.agents.get_mut(&sale.agent_id) {
            let (volume, units) = adjusted_counters(agent, -sale.amount, -sale.units)?;
            agent.current_volume = volume;
            agent.current_units = units;
        }
        tables.sales.remove(id);
        Ok(Some(sale))
    }

    async fn list_sales(&self, agent_id: Option<&AgentId>, limit: usize) -> Result<Vec<Sale>> {
        let tables = self.tables.read();
        let mut sales: Vec<Sale> = tables
            .sales
            .values()
            .filter(|s| agent_id.map_or(true, |id| &s.agent_id == id))
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sales.truncate(limit);
        Ok(sales)
    }
}

#[async_trait]
impl AnnouncementStore for MemoryStore {
    async fn insert_announcement(&self, announcement: &Announcement) -> Result<()> {
        self.tables
            .write()
            .announcements
            .insert(announcement.id.clone(), announcement.clone());
        Ok(())
    }

    async fn update_announcement(&self, announcement: &Announcement) -> Result<bool> {
        let mut tables = self.tables.write();
        match tables.announcements.get_mut(&announcement.id) {
            Some(existing) => {
                *existing = announcement.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_announcement(&self, id: &AnnouncementId) -> Result<bool> {
        Ok(self.tables.write().announcements.remove(id).is_some())
    }

    async fn get_announcement(&self, id: &AnnouncementId) -> Result<Option<Announcement>> {
        Ok(self.tables.read().announcements.get(id).cloned())
    }

    async fn list_announcements(&self, active_only: bool) -> Result<Vec<Announcement>> {
        let mut announcements: Vec<Announcement> = self
            .tables
            .read()
            .announcements
            .values()
            .filter(|a| !active_only || a.active)
            .cloned()
            .collect();
        announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(announcements)
    }
}

#[async_trait]
impl CashOfferStore for MemoryStore {
    async fn insert_cash_offer(&self, offer: &CashOffer) -> Result<()> {
        self.tables
            .write()
            .cash_offers
            .insert(offer.id.clone(), offer.clone());
        Ok(())
    }

    async fn update_cash_offer(&self, offer: &CashOffer) -> Result<bool> {
        let mut tables = self.tables.write();
        match tables.cash_offers.get_mut(&offer.id) {
            Some(existing) => {
                *existing = offer.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_cash_offer(&self, id: &CashOfferId) -> Result<bool> {
        Ok(self.tables.write().cash_offers.remove(id).is_some())
    }

    async fn get_cash_offer(&self, id: &CashOfferId) -> Result<Option<CashOffer>> {
        Ok(self.tables.read().cash_offers.get(id).cloned())
    }

    async fn list_cash_offers(&self, active_only: bool) -> Result<Vec<CashOffer>> {
        let mut offers: Vec<CashOffer> = self
            .tables
            .read()
            .cash_offers
            .values()
            .filter(|o| !active_only || o.active)
            .cloned()
            .collect();
        offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(offers)
    }
}
