//! Builders for domain values used across tests.
//!
//! Keeps tests focused on assertions rather than construction boilerplate.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::adapter::outbound::memory::MemoryStore;
use crate::domain::{Agent, AgentId, Sale, SaleId, Team, TeamId};
use crate::port::{AgentStore, SaleStore, TeamStore};

/// A team with the given monthly targets.
pub fn team(id: &str, name: &str, volume_target: Decimal, unit_target: i64) -> Team {
    Team {
        id: TeamId::from(id),
        name: name.to_string(),
        color: "#3b82f6".to_string(),
        monthly_volume_target: volume_target,
        monthly_unit_target: unit_target,
        created_at: Utc::now(),
    }
}

/// An agent with preset counters.
pub fn agent(id: &str, name: &str, team_id: Option<&str>, volume: Decimal, units: i64) -> Agent {
    Agent {
        id: AgentId::from(id),
        name: name.to_string(),
        team_id: team_id.map(TeamId::from),
        current_volume: volume,
        current_units: units,
        created_at: Utc::now(),
    }
}

/// A sale for `agent_id`.
pub fn sale(id: &str, agent_id: &str, amount: Decimal, units: i64) -> Sale {
    Sale {
        id: SaleId::from(id),
        agent_id: AgentId::from(agent_id),
        amount,
        units,
        created_at: Utc::now(),
    }
}

/// Monday 19 October 2026, a working day mid-month.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

/// `monday()` at the given local time.
pub fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
    monday().and_hms_opt(hour, minute, 0).expect("valid time")
}

/// A memory store seeded with teams and agents.
///
/// Agents are inserted with zero counters; their preset volume and units
/// are recorded as one sale each so counters and sales stay consistent.
pub async fn seeded_store(teams: &[Team], agents: &[Agent]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for team in teams {
        store.insert_team(team).await.expect("insert team");
    }
    for agent in agents {
        let mut fresh = agent.clone();
        fresh.current_volume = Decimal::ZERO;
        fresh.current_units = 0;
        store.insert_agent(&fresh).await.expect("insert agent");
        if agent.current_volume != Decimal::ZERO || agent.current_units != 0 {
            let opening = Sale {
                id: SaleId::generate(),
                agent_id: agent.id.clone(),
                amount: agent.current_volume,
                units: agent.current_units,
                created_at: Utc::now(),
            };
            store.insert_sale(&opening).await.expect("insert sale");
        }
    }
    store
}
