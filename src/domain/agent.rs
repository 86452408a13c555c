//! Sales agents and their running progress counters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{AgentId, TeamId};
use super::money::{lenient_decimal, lenient_units};

/// A sales agent.
///
/// `current_volume` and `current_units` are running totals of the agent's
/// recorded sales. Stores keep them in step with sale inserts and deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub current_volume: Decimal,
    #[serde(default, deserialize_with = "lenient_units::deserialize")]
    pub current_units: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Whether this agent belongs to the given team.
    #[must_use]
    pub fn is_member_of(&self, team_id: &TeamId) -> bool {
        self.team_id.as_ref() == Some(team_id)
    }
}

/// Admin input for creating an agent.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAgent {
    pub name: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
}

impl NewAgent {
    /// Build the agent with zeroed counters.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyName`] for a blank name.
    pub fn into_agent(self) -> Result<Agent, DomainError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyName { entity: "agent" });
        }
        Ok(Agent {
            id: AgentId::generate(),
            name,
            team_id: self.team_id,
            current_volume: Decimal::ZERO,
            current_units: 0,
            created_at: Utc::now(),
        })
    }
}

/// Partial update for an agent.
///
/// `team_id` distinguishes "leave unchanged" (absent) from "unassign"
/// (explicit null).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentUpdate {
    pub name: Option<String>,
    #[serde(default, with = "double_option")]
    pub team_id: Option<Option<TeamId>>,
}

impl Agent {
    /// Apply a partial update.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyName`] for a blank replacement name.
    pub fn apply(&mut self, update: AgentUpdate) -> Result<(), DomainError> {
        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::EmptyName { entity: "agent" });
            }
            self.name = name;
        }
        if let Some(team_id) = update.team_id {
            self.team_id = team_id;
        }
        Ok(())
    }
}

mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
