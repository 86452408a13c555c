//! Catch-up adjusted daily targets.
//!
//! A team's monthly target is spread over the month's working days. Any
//! shortfall against the monthly target is redistributed evenly over the
//! working days that remain, so a team that falls behind sees a higher
//! daily target and a team that is ahead sees a lower one.
//!
//! Per dimension (volume and units):
//!
//! ```text
//! expected_by_today = monthly / total_days * elapsed_days
//! remaining         = max(0, monthly - current)
//! adjusted_daily    = remaining / remaining_days      (0 when no days remain)
//! progress_percent  = current / expected_by_today * 100 (100 when nothing is expected yet)
//! ```
//!
//! A team is behind schedule when either dimension is below 90%.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calendar::WorkingDays;
use super::id::TeamId;
use super::progress::TeamProgress;
use super::team::Team;

/// Progress percentage below which a dimension counts as lagging.
pub const BEHIND_SCHEDULE_PERCENT: Decimal = dec!(90);

/// Redistributed target for one dimension (volume or units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionTarget {
    pub monthly_target: Decimal,
    pub current: Decimal,
    /// Static daily share: `monthly_target / total_days`.
    pub original_daily_target: Decimal,
    pub expected_by_today: Decimal,
    pub remaining_target: Decimal,
    pub adjusted_daily_target: Decimal,
    pub progress_percent: Decimal,
}

impl DimensionTarget {
    /// Redistribute `monthly_target` given `current` progress and the calendar.
    #[must_use]
    pub fn compute(monthly_target: Decimal, current: Decimal, days: WorkingDays) -> Self {
        let total_days = Decimal::from(days.total);
        let remaining_days = Decimal::from(days.remaining);

        let original_daily_target = monthly_target
            .checked_div(total_days)
            .unwrap_or(Decimal::ZERO);
        let expected_by_today =
            original_daily_target.saturating_mul(Decimal::from(days.elapsed()));

        let remaining_target = monthly_target.saturating_sub(current).max(Decimal::ZERO);
        let adjusted_daily_target = remaining_target
            .checked_div(remaining_days)
            .unwrap_or(Decimal::ZERO);

        let progress_percent = if expected_by_today > Decimal::ZERO {
            current
                .checked_div(expected_by_today)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(if current.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                })
        } else {
            Decimal::ONE_HUNDRED
        };

        Self {
            monthly_target,
            current,
            original_daily_target,
            expected_by_today,
            remaining_target,
            adjusted_daily_target,
            progress_percent,
        }
    }

    /// Whether this dimension is under the behind-schedule threshold.
    #[must_use]
    pub fn is_lagging(&self) -> bool {
        self.progress_percent < BEHIND_SCHEDULE_PERCENT
    }
}

/// A team's daily target snapshot.
///
/// Only meaningful while the team and agent data it was built from is fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTarget {
    pub team_id: TeamId,
    pub team_name: String,
    pub color: String,
    pub volume: DimensionTarget,
    pub units: DimensionTarget,
    pub working_days: WorkingDays,
    pub is_behind_schedule: bool,
}

impl DailyTarget {
    /// Compute the snapshot for `team` from its aggregated progress.
    #[must_use]
    pub fn compute(team: &Team, progress: TeamProgress, days: WorkingDays) -> Self {
        let volume = DimensionTarget::compute(team.monthly_volume_target, progress.total_volume, days);
        let units = DimensionTarget::compute(
            Decimal::from(team.monthly_unit_target),
            Decimal::from(progress.total_units),
            days,
        );
        Self {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            color: team.color.clone(),
            is_behind_schedule: volume.is_lagging() || units.is_lagging(),
            volume,
            units,
            working_days: days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn days(remaining: u32, total: u32) -> WorkingDays {
        WorkingDays { remaining, total }
    }

    fn team(volume: Decimal, units: i64) -> Team {
        Team {
            id: TeamId::from("t1"),
            name: "Falcons".into(),
            color: "#0ea5e9".into(),
            monthly_volume_target: volume,
            monthly_unit_target: units,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn expected_by_today_is_linear_pro_rata() {
        // 20 working days, 10 elapsed (remaining 11 including today).
        let target = DimensionTarget::compute(dec!(100000), dec!(40000), days(11, 20));

        assert_eq!(target.expected_by_today, dec!(50000));
        assert_eq!(target.progress_percent, dec!(80));
        assert!(target.is_lagging());
    }

    #[test]
    fn met_target_leaves_nothing_to_redistribute() {
        let target = DimensionTarget::compute(dec!(100000), dec!(100000), days(5, 20));
        assert_eq!(target.remaining_target, Decimal::ZERO);
        assert_eq!(target.adjusted_daily_target, Decimal::ZERO);
    }

    #[test]
    fn exceeded_target_never_goes_negative() {
        let target = DimensionTarget::compute(dec!(1000), dec!(1500), days(5, 20));
        assert_eq!(target.remaining_target, Decimal::ZERO);
        assert_eq!(target.adjusted_daily_target, Decimal::ZERO);
    }

    #[test]
    fn no_remaining_days_means_zero_adjusted_target() {
        let target = DimensionTarget::compute(dec!(1000), dec!(200), days(0, 20));
        assert_eq!(target.remaining_target, dec!(800));
        assert_eq!(target.adjusted_daily_target, Decimal::ZERO);
    }

    #[test]
    fn shortfall_is_spread_over_remaining_days() {
        let target = DimensionTarget::compute(dec!(100000), dec!(40000), days(12, 20));
        assert_eq!(target.original_daily_target, dec!(5000));
        assert_eq!(target.adjusted_daily_target, dec!(5000));

        let target = DimensionTarget::compute(dec!(100000), dec!(20000), days(10, 20));
        assert_eq!(target.adjusted_daily_target, dec!(8000));
    }

    #[test]
    fn nothing_expected_counts_as_on_pace() {
        let target = DimensionTarget::compute(Decimal::ZERO, Decimal::ZERO, days(10, 20));
        assert_eq!(target.progress_percent, Decimal::ONE_HUNDRED);
        assert!(!target.is_lagging());

        let empty_month = DimensionTarget::compute(dec!(500), Decimal::ZERO, days(0, 0));
        assert_eq!(empty_month.expected_by_today, Decimal::ZERO);
        assert_eq!(empty_month.progress_percent, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn extreme_progress_saturates() {
        let target = DimensionTarget::compute(dec!(100), Decimal::MAX / dec!(2), days(27, 27));
        assert_eq!(target.progress_percent, Decimal::MAX);
        assert_eq!(target.remaining_target, Decimal::ZERO);
        assert!(!target.is_lagging());

        let target = DimensionTarget::compute(Decimal::MAX, Decimal::MIN, days(1, 27));
        assert_eq!(target.remaining_target, Decimal::MAX);
        assert!(target.is_lagging());
    }

    #[test]
    fn extreme_agent_counters_still_produce_a_target() {
        let snapshot = DailyTarget::compute(
            &team(Decimal::MAX, i64::MAX),
            TeamProgress {
                total_volume: Decimal::MAX,
                total_units: i64::MAX,
            },
            days(1, 27),
        );
        assert!(!snapshot.is_behind_schedule);
        assert_eq!(snapshot.volume.remaining_target, Decimal::ZERO);
    }

    #[test]
    fn exactly_ninety_percent_is_not_behind() {
        let snapshot = DailyTarget::compute(
            &team(dec!(100000), 100),
            TeamProgress {
                total_volume: dec!(45000),
                total_units: 45,
            },
            days(11, 20),
        );

        assert_eq!(snapshot.volume.progress_percent, dec!(90));
        assert_eq!(snapshot.units.progress_percent, dec!(90));
        assert!(!snapshot.is_behind_schedule);
    }

    #[test]
    fn either_dimension_lagging_marks_team_behind() {
        let snapshot = DailyTarget::compute(
            &team(dec!(100000), 100),
            TeamProgress {
                total_volume: dec!(60000),
                total_units: 44,
            },
            days(11, 20),
        );

        assert!(!snapshot.volume.is_lagging());
        assert!(snapshot.units.is_lagging());
        assert!(snapshot.is_behind_schedule);
    }

    #[test]
    fn snapshot_carries_team_identity_and_days() {
        let snapshot = DailyTarget::compute(&team(dec!(1000), 10), TeamProgress::default(), days(3, 20));
        assert_eq!(snapshot.team_name, "Falcons");
        assert_eq!(snapshot.color, "#0ea5e9");
        assert_eq!(snapshot.working_days, days(3, 20));
    }
}
