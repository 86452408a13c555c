//! Daily target computation over a snapshot.

use chrono::NaiveDate;

use crate::domain::progress::aggregate_team_progress;
use crate::domain::{DailyTarget, WorkingDayCalendar};
use crate::port::Snapshot;

/// Compute every team's daily target for `today`.
///
/// Working days are counted once and shared by all teams. Output order
/// follows `snapshot.teams`.
#[must_use]
pub fn compute_daily_targets(
    snapshot: &Snapshot,
    calendar: &WorkingDayCalendar,
    today: NaiveDate,
) -> Vec<DailyTarget> {
    let days = calendar.working_days(today);
    snapshot
        .teams
        .iter()
        .map(|team| {
            let progress = aggregate_team_progress(&snapshot.agents, &team.id);
            DailyTarget::compute(team, progress, days)
        })
        .collect()
}

/// Teams currently behind schedule.
pub fn behind_schedule(targets: &[DailyTarget]) -> impl Iterator<Item = &DailyTarget> {
    targets.iter().filter(|t| t.is_behind_schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Agent, AgentId, Team, TeamId, WeekendPolicy};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn team(id: &str, volume: rust_decimal::Decimal, units: i64) -> Team {
        Team {
            id: TeamId::from(id),
            name: id.to_uppercase(),
            color: "#000".into(),
            monthly_volume_target: volume,
            monthly_unit_target: units,
            created_at: Utc::now(),
        }
    }

    fn agent(id: &str, team: &str, volume: rust_decimal::Decimal, units: i64) -> Agent {
        Agent {
            id: AgentId::from(id),
            name: id.into(),
            team_id: Some(TeamId::from(team)),
            current_volume: volume,
            current_units: units,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn teams_are_computed_independently() {
        let snapshot = Snapshot {
            teams: vec![team("a", dec!(100000), 100), team("b", dec!(50000), 0)],
            agents: vec![
                agent("x", "a", dec!(100000), 100),
                agent("y", "b", dec!(0), 0),
            ],
        };
        let calendar = WorkingDayCalendar::new(WeekendPolicy::SundayOnly);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let targets = compute_daily_targets(&snapshot, &calendar, today);

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].team_id, TeamId::from("a"));
        assert_eq!(targets[0].volume.remaining_target, dec!(0));
        assert_eq!(targets[0].volume.adjusted_daily_target, dec!(0));
        assert!(!targets[0].is_behind_schedule);

        assert!(targets[1].is_behind_schedule);
        let behind: Vec<_> = behind_schedule(&targets).map(|t| t.team_id.clone()).collect();
        assert_eq!(behind, vec![TeamId::from("b")]);
    }

    #[test]
    fn override_drives_shared_working_days() {
        let snapshot = Snapshot {
            teams: vec![team("a", dec!(1000), 10)],
            agents: vec![],
        };
        let calendar = WorkingDayCalendar::new(WeekendPolicy::SundayOnly).with_override(Some(10));
        let today = NaiveDate::from_ymd_opt(2026, 9, 11).unwrap();

        let targets = compute_daily_targets(&snapshot, &calendar, today);
        assert_eq!(targets[0].working_days.remaining, 7);
        assert_eq!(targets[0].working_days.total, 10);
    }

    #[test]
    fn empty_snapshot_yields_no_targets() {
        let calendar = WorkingDayCalendar::default();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(compute_daily_targets(&Snapshot::default(), &calendar, today).is_empty());
    }
}
