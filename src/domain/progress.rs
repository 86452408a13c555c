//! Team progress aggregation and the agent leaderboard.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::agent::Agent;
use super::id::{AgentId, TeamId};
use super::team::Team;

/// Summed progress of a team's agents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamProgress {
    pub total_volume: Decimal,
    pub total_units: i64,
}

/// Sum the current volume and units of every agent on `team_id`.
///
/// Sums saturate at the numeric bounds rather than overflow.
#[must_use]
pub fn aggregate_team_progress(agents: &[Agent], team_id: &TeamId) -> TeamProgress {
    agents
        .iter()
        .filter(|agent| agent.is_member_of(team_id))
        .fold(TeamProgress::default(), |acc, agent| TeamProgress {
            total_volume: acc.total_volume.saturating_add(agent.current_volume),
            total_units: acc.total_units.saturating_add(agent.current_units),
        })
}

/// Progress of one team, for the dashboard progress view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProgressEntry {
    pub team_id: TeamId,
    pub team_name: String,
    pub color: String,
    #[serde(flatten)]
    pub progress: TeamProgress,
}

/// Aggregate every team in `teams`.
#[must_use]
pub fn team_progress_entries(teams: &[Team], agents: &[Agent]) -> Vec<TeamProgressEntry> {
    teams
        .iter()
        .map(|team| TeamProgressEntry {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            color: team.color.clone(),
            progress: aggregate_team_progress(agents, &team.id),
        })
        .collect()
}

/// A ranked agent on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub agent_id: AgentId,
    pub agent_name: String,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
    pub current_volume: Decimal,
    pub current_units: i64,
}

/// Rank agents by volume, then units, then name.
#[must_use]
pub fn rank_agents(agents: &[Agent], teams: &[Team]) -> Vec<LeaderboardEntry> {
    let team_names: HashMap<&TeamId, &str> =
        teams.iter().map(|t| (&t.id, t.name.as_str())).collect();

    let mut sorted: Vec<&Agent> = agents.iter().collect();
    sorted.sort_by(|a, b| {
        b.current_volume
            .cmp(&a.current_volume)
            .then_with(|| b.current_units.cmp(&a.current_units))
            .then_with(|| a.name.cmp(&b.name))
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, agent)| LeaderboardEntry {
            rank: i + 1,
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            team_id: agent.team_id.clone(),
            team_name: agent
                .team_id
                .as_ref()
                .and_then(|id| team_names.get(id))
                .map(|name| (*name).to_string()),
            current_volume: agent.current_volume,
            current_units: agent.current_units,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn agent(id: &str, team: Option<&str>, volume: Decimal, units: i64) -> Agent {
        Agent {
            id: AgentId::from(id),
            name: id.to_uppercase(),
            team_id: team.map(TeamId::from),
            current_volume: volume,
            current_units: units,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn aggregate_sums_only_team_members() {
        let agents = vec![
            agent("a", Some("t1"), dec!(1000.50), 2),
            agent("b", Some("t1"), dec!(250), 1),
            agent("c", Some("t2"), dec!(9999), 9),
            agent("d", None, dec!(5), 5),
        ];

        let progress = aggregate_team_progress(&agents, &TeamId::from("t1"));
        assert_eq!(progress.total_volume, dec!(1250.50));
        assert_eq!(progress.total_units, 3);
    }

    #[test]
    fn aggregate_saturates_instead_of_overflowing() {
        let agents = vec![
            agent("a", Some("t1"), Decimal::MAX, i64::MAX),
            agent("b", Some("t1"), Decimal::MAX, 1),
        ];

        let progress = aggregate_team_progress(&agents, &TeamId::from("t1"));
        assert_eq!(progress.total_volume, Decimal::MAX);
        assert_eq!(progress.total_units, i64::MAX);
    }

    #[test]
    fn aggregate_of_unknown_team_is_zero() {
        let agents = vec![agent("a", Some("t1"), dec!(10), 1)];
        let progress = aggregate_team_progress(&agents, &TeamId::from("nope"));
        assert_eq!(progress, TeamProgress::default());
    }

    #[test]
    fn ranking_orders_by_volume_then_units_then_name() {
        let agents = vec![
            agent("b", Some("t1"), dec!(500), 1),
            agent("a", Some("t1"), dec!(500), 1),
            agent("c", None, dec!(500), 4),
            agent("d", Some("t1"), dec!(900), 0),
        ];
        let teams = vec![Team {
            id: TeamId::from("t1"),
            name: "Hunters".into(),
            color: String::new(),
            monthly_volume_target: dec!(0),
            monthly_unit_target: 0,
            created_at: Utc::now(),
        }];

        let ranked = rank_agents(&agents, &teams);
        let order: Vec<&str> = ranked.iter().map(|e| e.agent_id.as_str()).collect();
        assert_eq!(order, vec!["d", "c", "a", "b"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].team_name.as_deref(), Some("Hunters"));
        assert_eq!(ranked[1].team_name, None);
    }
}
