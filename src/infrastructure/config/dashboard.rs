//! Dashboard computation and polling configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::scheduler::SchedulerConfig;
use crate::domain::{WeekendPolicy, WorkingDayCalendar};

/// Settings for the target computation and the TV dashboard client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Which weekdays are not working days.
    #[serde(default)]
    pub weekend_policy: WeekendPolicy,
    /// Fixed number of working days this month. Unset or 0 counts weekdays.
    #[serde(default)]
    pub working_days_override: Option<u32>,
    /// Snapshot poll period (default: 5).
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Target recompute period (default: 60).
    #[serde(default = "default_recompute_interval_secs")]
    pub recompute_interval_secs: u64,
    /// Server the `dashboard` command polls.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Per-request timeout for snapshot fetches (default: 10).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Attempts per snapshot fetch on connect or timeout errors (default: 3).
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Pause between fetch attempts (default: 500).
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_refresh_interval_secs() -> u64 {
    5
}

const fn default_recompute_interval_secs() -> u64 {
    60
}

fn default_server_url() -> String {
    "http://127.0.0.1:8080".into()
}

const fn default_request_timeout_secs() -> u64 {
    10
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

impl DashboardConfig {
    #[must_use]
    pub fn calendar(&self) -> WorkingDayCalendar {
        WorkingDayCalendar::new(self.weekend_policy).with_override(self.working_days_override)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Scheduler periods; the alert period comes from the alerts section.
    #[must_use]
    pub fn scheduler(&self, alert_interval: Duration) -> SchedulerConfig {
        SchedulerConfig {
            refresh_interval: Duration::from_secs(self.refresh_interval_secs),
            recompute_interval: Duration::from_secs(self.recompute_interval_secs),
            alert_interval,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            weekend_policy: WeekendPolicy::default(),
            working_days_override: None,
            refresh_interval_secs: default_refresh_interval_secs(),
            recompute_interval_secs: default_recompute_interval_secs(),
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}
