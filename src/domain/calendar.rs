//! Working-day calendar for monthly target pacing.
//!
//! Counts the working days of the current month and how many of them remain,
//! today included. Which weekdays count as weekend is a [`WeekendPolicy`].
//!
//! When an admin overrides the month's working-day total, the remaining count
//! is derived proportionally from calendar days left instead of recounted by
//! weekday:
//!
//! ```text
//! remaining = round_half_up(days_left_in_month / days_in_month * override)
//! ```
//!
//! This can disagree with the weekday count. It is a deliberate smoothing
//! approximation.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Which weekdays are excluded from working days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekendPolicy {
    /// Only Sundays are off.
    #[default]
    SundayOnly,
    /// Saturdays and Sundays are off.
    SaturdayAndSunday,
}

impl WeekendPolicy {
    /// Whether `date` is a working day under this policy.
    #[must_use]
    pub fn is_working_day(self, date: NaiveDate) -> bool {
        match self {
            Self::SundayOnly => date.weekday() != Weekday::Sun,
            Self::SaturdayAndSunday => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }
}

/// Working-day counts for a month as seen from one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDays {
    /// Working days left in the month, today included.
    pub remaining: u32,
    /// Working days in the whole month.
    pub total: u32,
}

impl WorkingDays {
    /// Working days elapsed so far, today included: `total - remaining + 1`.
    #[must_use]
    pub fn elapsed(&self) -> u32 {
        (self.total + 1).saturating_sub(self.remaining)
    }
}

/// Computes [`WorkingDays`] for a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkingDayCalendar {
    policy: WeekendPolicy,
    override_total: Option<u32>,
}

impl WorkingDayCalendar {
    #[must_use]
    pub fn new(policy: WeekendPolicy) -> Self {
        Self {
            policy,
            override_total: None,
        }
    }

    /// Replace the computed monthly total with a fixed number of days.
    ///
    /// `None` or `Some(0)` clears the override.
    #[must_use]
    pub fn with_override(mut self, total: Option<u32>) -> Self {
        self.override_total = total.filter(|t| *t > 0);
        self
    }

    #[must_use]
    pub fn policy(&self) -> WeekendPolicy {
        self.policy
    }

    #[must_use]
    pub fn override_total(&self) -> Option<u32> {
        self.override_total
    }

    /// Working days for the month containing `today`.
    #[must_use]
    pub fn working_days(&self, today: NaiveDate) -> WorkingDays {
        let month_days = days_in_month(today);
        let day = today.day();

        if let Some(total) = self.override_total {
            let days_left = month_days.saturating_sub(day) + 1;
            let remaining = (Decimal::from(days_left) / Decimal::from(month_days)
                * Decimal::from(total))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0);
            return WorkingDays { remaining, total };
        }

        let mut total = 0;
        let mut remaining = 0;
        for d in 1..=month_days {
            let Some(date) = today.with_day(d) else {
                continue;
            };
            if self.policy.is_working_day(date) {
                total += 1;
                if d >= day {
                    remaining += 1;
                }
            }
        }
        WorkingDays { remaining, total }
    }
}

/// Number of calendar days in the month containing `date`.
#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => u32::try_from((next - first).num_days()).unwrap_or(31),
        _ => 31,
    }
}
