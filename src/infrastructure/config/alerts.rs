//! Lagging-team alert configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::AlertPolicy;

/// When and how often lagging teams are announced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AlertsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between alert checks (default: 300).
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// Minutes between two alerts for the same team (default: 15).
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,
    /// First working hour, inclusive (default: 9).
    #[serde(default = "default_working_hours_start")]
    pub working_hours_start: u32,
    /// End of the working day, exclusive (default: 18).
    #[serde(default = "default_working_hours_end")]
    pub working_hours_end: u32,
    /// Earliest hour alerts may fire (default: 10).
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
}

const fn default_true() -> bool {
    true
}

const fn default_check_interval_secs() -> u64 {
    300
}

const fn default_cooldown_minutes() -> u64 {
    15
}

const fn default_working_hours_start() -> u32 {
    9
}

const fn default_working_hours_end() -> u32 {
    18
}

const fn default_start_hour() -> u32 {
    10
}

impl AlertsConfig {
    #[must_use]
    pub fn policy(&self) -> AlertPolicy {
        let minutes = i64::try_from(self.cooldown_minutes).unwrap_or(i64::MAX / 60_000);
        AlertPolicy {
            working_hours_start: self.working_hours_start,
            working_hours_end: self.working_hours_end,
            start_hour: self.start_hour,
            cooldown: chrono::Duration::minutes(minutes),
        }
    }

    #[must_use]
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            check_interval_secs: default_check_interval_secs(),
            cooldown_minutes: default_cooldown_minutes(),
            working_hours_start: default_working_hours_start(),
            working_hours_end: default_working_hours_end(),
            start_hour: default_start_hour(),
        }
    }
}
