//! Lagging-team alert dispatch with per-team cooldown.
//!
//! Each team has its own last-alert timestamp. A check raises an alert for a
//! team when all of the following hold:
//!
//! - the local hour is inside the working-hours window `[start, end)`
//! - the local hour is at or past the alert start hour
//! - the team is behind schedule
//! - the cooldown has elapsed since that team's last alert (or it never had one)
//!
//! The check cadence and the cooldown are independent: with a 5 minute check
//! and a 15 minute cooldown, an eligible team is announced every third check.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::id::TeamId;
use super::target::DailyTarget;

/// When lagging-team alerts may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPolicy {
    /// First hour of the working day (inclusive).
    pub working_hours_start: u32,
    /// Hour the working day ends (exclusive).
    pub working_hours_end: u32,
    /// Earliest hour alerts may fire.
    pub start_hour: u32,
    /// Minimum time between two alerts for the same team.
    pub cooldown: Duration,
}

impl AlertPolicy {
    /// Whether `now` falls inside the alerting window.
    #[must_use]
    pub fn in_alert_window(&self, now: NaiveDateTime) -> bool {
        let hour = now.hour();
        hour >= self.working_hours_start && hour < self.working_hours_end && hour >= self.start_hour
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            working_hours_start: 9,
            working_hours_end: 18,
            start_hour: 10,
            cooldown: Duration::minutes(15),
        }
    }
}

/// An alert for a team that is behind schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaggingAlert {
    pub team_id: TeamId,
    pub team_name: String,
    pub volume_progress_percent: Decimal,
    pub units_progress_percent: Decimal,
    pub raised_at: NaiveDateTime,
}

impl LaggingAlert {
    /// Spoken text describing the team and both percentages.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Attention. Team {} is behind schedule. Volume is at {} percent and units are at {} percent of today's target.",
            self.team_name,
            whole_percent(self.volume_progress_percent),
            whole_percent(self.units_progress_percent),
        )
    }
}

fn whole_percent(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Per-team alert state machine.
#[derive(Debug, Clone, Default)]
pub struct AlertDispatcher {
    policy: AlertPolicy,
    last_alert: HashMap<TeamId, NaiveDateTime>,
}

impl AlertDispatcher {
    #[must_use]
    pub fn new(policy: AlertPolicy) -> Self {
        Self {
            policy,
            last_alert: HashMap::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    /// When `team_id` was last alerted, if ever.
    #[must_use]
    pub fn last_alert(&self, team_id: &TeamId) -> Option<NaiveDateTime> {
        self.last_alert.get(team_id).copied()
    }

    fn cooled_down(&self, team_id: &TeamId, now: NaiveDateTime) -> bool {
        match self.last_alert.get(team_id) {
            None => true,
            Some(last) => now.signed_duration_since(*last) >= self.policy.cooldown,
        }
    }

    /// Evaluate every target and return the alerts to emit now.
    ///
    /// Each returned alert's team has its last-alert time set to `now`.
    pub fn evaluate(&mut self, targets: &[DailyTarget], now: NaiveDateTime) -> Vec<LaggingAlert> {
        if !self.policy.in_alert_window(now) {
            return Vec::new();
        }

        let mut alerts = Vec::new();
        for target in targets {
            if !target.is_behind_schedule || !self.cooled_down(&target.team_id, now) {
                continue;
            }
            self.last_alert.insert(target.team_id.clone(), now);
            alerts.push(LaggingAlert {
                team_id: target.team_id.clone(),
                team_name: target.team_name.clone(),
                volume_progress_percent: target.volume.progress_percent,
                units_progress_percent: target.units.progress_percent,
                raised_at: now,
            });
        }
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::WorkingDays;
    use crate::domain::progress::TeamProgress;
    use crate::domain::team::Team;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn target(id: &str, volume: Decimal) -> DailyTarget {
        let team = Team {
            id: TeamId::from(id),
            name: id.to_string(),
            color: String::new(),
            monthly_volume_target: dec!(100000),
            monthly_unit_target: 0,
            created_at: Utc::now(),
        };
        DailyTarget::compute(
            &team,
            TeamProgress {
                total_volume: volume,
                total_units: 0,
            },
            WorkingDays {
                remaining: 11,
                total: 20,
            },
        )
    }

    #[test]
    fn behind_team_alerts_inside_window() {
        let mut dispatcher = AlertDispatcher::default();
        let alerts = dispatcher.evaluate(&[target("north", dec!(40000))], at(11, 0));

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].volume_progress_percent, dec!(80));
        assert_eq!(dispatcher.last_alert(&TeamId::from("north")), Some(at(11, 0)));
    }

    #[test]
    fn on_pace_team_never_alerts() {
        let mut dispatcher = AlertDispatcher::default();
        assert!(dispatcher
            .evaluate(&[target("north", dec!(50000))], at(11, 0))
            .is_empty());
    }

    #[test]
    fn no_alerts_outside_hours_or_before_start_hour() {
        let mut dispatcher = AlertDispatcher::default();
        let behind = [target("north", dec!(10000))];

        assert!(dispatcher.evaluate(&behind, at(8, 59)).is_empty());
        assert!(dispatcher.evaluate(&behind, at(9, 30)).is_empty());
        assert!(dispatcher.evaluate(&behind, at(18, 0)).is_empty());
        assert_eq!(dispatcher.last_alert(&TeamId::from("north")), None);
    }

    #[test]
    fn cooldown_suppresses_repeat_alerts() {
        let mut dispatcher = AlertDispatcher::default();
        let behind = [target("north", dec!(10000))];

        assert_eq!(dispatcher.evaluate(&behind, at(11, 0)).len(), 1);
        assert!(dispatcher.evaluate(&behind, at(11, 5)).is_empty());
        assert!(dispatcher.evaluate(&behind, at(11, 10)).is_empty());
        assert_eq!(dispatcher.evaluate(&behind, at(11, 15)).len(), 1);
    }

    #[test]
    fn cooldowns_are_independent_per_team() {
        let mut dispatcher = AlertDispatcher::default();

        let first = dispatcher.evaluate(&[target("north", dec!(10000))], at(11, 0));
        assert_eq!(first.len(), 1);

        let second = dispatcher.evaluate(
            &[target("north", dec!(10000)), target("south", dec!(10000))],
            at(11, 5),
        );
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].team_id, TeamId::from("south"));
    }

    #[test]
    fn message_rounds_percentages() {
        let alert = LaggingAlert {
            team_id: TeamId::from("t"),
            team_name: "Falcons".into(),
            volume_progress_percent: dec!(79.5),
            units_progress_percent: dec!(66.666),
            raised_at: at(11, 0),
        };
        let message = alert.message();
        assert!(message.contains("Team Falcons"));
        assert!(message.contains("Volume is at 80 percent"));
        assert!(message.contains("units are at 67 percent"));
    }
}
