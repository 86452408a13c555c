//! Entity-change events broadcast to live clients.
//!
//! Events are JSON objects tagged by `type`:
//!
//! ```json
//! {"type":"team","action":"updated","id":"..."}
//! {"type":"sale","action":"created","id":"...","agent_id":"..."}
//! {"type":"celebration","agent_id":"...","agent_name":"Dana","team_name":"Falcons","amount":"1200","units":1}
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{AgentId, AnnouncementId, CashOfferId, SaleId, TeamId};
use super::sale::Sale;

/// What happened to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

/// A change to leaderboard data, or a celebratory UI cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    Team {
        action: ChangeAction,
        id: TeamId,
    },
    Agent {
        action: ChangeAction,
        id: AgentId,
    },
    Sale {
        action: ChangeAction,
        id: SaleId,
        agent_id: AgentId,
    },
    Announcement {
        action: ChangeAction,
        id: AnnouncementId,
    },
    CashOffer {
        action: ChangeAction,
        id: CashOfferId,
    },
    /// A new sale worth celebrating on the dashboard.
    Celebration(Celebration),
}

/// Payload for the celebration effect shown when a sale lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Celebration {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub team_name: Option<String>,
    pub amount: Decimal,
    pub units: i64,
}

impl ChangeEvent {
    /// Event for a sale insert or delete.
    #[must_use]
    pub fn sale(action: ChangeAction, sale: &Sale) -> Self {
        Self::Sale {
            action,
            id: sale.id.clone(),
            agent_id: sale.agent_id.clone(),
        }
    }

    /// Short label for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Team { .. } => "team",
            Self::Agent { .. } => "agent",
            Self::Sale { .. } => "sale",
            Self::Announcement { .. } => "announcement",
            Self::CashOffer { .. } => "cash_offer",
            Self::Celebration(_) => "celebration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn entity_events_are_tagged_by_type() {
        let event = ChangeEvent::Team {
            action: ChangeAction::Updated,
            id: TeamId::from("t1"),
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "team");
        assert_eq!(json["action"], "updated");
        assert_eq!(json["id"], "t1");
    }

    #[test]
    fn celebration_round_trips_through_json() {
        let event = ChangeEvent::Celebration(Celebration {
            agent_id: AgentId::from("a1"),
            agent_name: "Dana".into(),
            team_name: Some("Falcons".into()),
            amount: dec!(1200),
            units: 1,
        });
        let text = serde_json::to_string(&event).unwrap();
        assert!(text.contains("\"type\":\"celebration\""));

        let parsed: ChangeEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.kind(), "celebration");
    }

    #[test]
    fn cash_offer_events_use_snake_case_tag() {
        let event = ChangeEvent::CashOffer {
            action: ChangeAction::Created,
            id: CashOfferId::from("c1"),
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "cash_offer");
        assert_eq!(json["id"], "c1");
        assert_eq!(event.kind(), "cash_offer");
    }
}
