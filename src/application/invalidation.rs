//! Which cached views a change event makes stale.

use serde::Serialize;

use crate::domain::ChangeEvent;

/// A client-side query that can be refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKey {
    Teams,
    Agents,
    Sales,
    Announcements,
    CashOffers,
    Leaderboard,
    Targets,
}

/// Queries to refresh after `event`.
#[must_use]
pub fn queries_for(event: &ChangeEvent) -> &'static [QueryKey] {
    use QueryKey::{Agents, Announcements, CashOffers, Leaderboard, Sales, Targets, Teams};

    match event {
        ChangeEvent::Team { .. } => &[Teams, Leaderboard, Targets],
        ChangeEvent::Agent { .. } => &[Agents, Leaderboard, Targets],
        ChangeEvent::Sale { .. } => &[Sales, Agents, Leaderboard, Targets],
        ChangeEvent::Announcement { .. } => &[Announcements],
        ChangeEvent::CashOffer { .. } => &[CashOffers],
        ChangeEvent::Celebration(_) => &[],
    }
}

/// Whether the dashboard snapshot must be reloaded after `event`.
#[must_use]
pub fn refreshes_dashboard(event: &ChangeEvent) -> bool {
    queries_for(event)
        .iter()
        .any(|q| matches!(q, QueryKey::Teams | QueryKey::Agents | QueryKey::Targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AgentId, AnnouncementId, CashOfferId, ChangeAction, Celebration, SaleId, TeamId,
    };
    use rust_decimal_macros::dec;

    #[test]
    fn sale_invalidates_sales_agents_leaderboard_and_targets() {
        let event = ChangeEvent::Sale {
            action: ChangeAction::Created,
            id: SaleId::from("s1"),
            agent_id: AgentId::from("a1"),
        };
        assert_eq!(
            queries_for(&event),
            &[QueryKey::Sales, QueryKey::Agents, QueryKey::Leaderboard, QueryKey::Targets]
        );
        assert!(refreshes_dashboard(&event));
    }

    #[test]
    fn team_change_refreshes_dashboard() {
        let event = ChangeEvent::Team {
            action: ChangeAction::Deleted,
            id: TeamId::from("t1"),
        };
        assert!(queries_for(&event).contains(&QueryKey::Targets));
        assert!(refreshes_dashboard(&event));
    }

    #[test]
    fn announcements_leave_dashboard_alone() {
        let event = ChangeEvent::Announcement {
            action: ChangeAction::Updated,
            id: AnnouncementId::from("n1"),
        };
        assert_eq!(queries_for(&event), &[QueryKey::Announcements]);
        assert!(!refreshes_dashboard(&event));
    }

    #[test]
    fn cash_offers_refresh_only_their_list() {
        let event = ChangeEvent::CashOffer {
            action: ChangeAction::Deleted,
            id: CashOfferId::from("c1"),
        };
        assert_eq!(queries_for(&event), &[QueryKey::CashOffers]);
        assert!(!refreshes_dashboard(&event));
    }

    #[test]
    fn celebration_invalidates_nothing() {
        let event = ChangeEvent::Celebration(Celebration {
            agent_id: AgentId::from("a1"),
            agent_name: "Dana".into(),
            team_name: None,
            amount: dec!(10),
            units: 1,
        });
        assert!(queries_for(&event).is_empty());
        assert!(!refreshes_dashboard(&event));
    }
}
