//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to defaults. `LEADERBOARD_DATABASE` overrides the database
//! path.
//!
//! # Example
//!
//! ```no_run
//! use leaderboard::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::alerts::AlertsConfig;
use super::dashboard::DashboardConfig;
use super::database::{DatabaseConfig, DATABASE_ENV};
use super::feed::FeedConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::speech::SpeechConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// REST and WebSocket server.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite database.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging and tracing.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Working-day calendar, recompute cadence and the remote server to poll.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Lagging-team alerts.
    #[serde(default)]
    pub alerts: AlertsConfig,

    /// Speech back-end for alerts.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Live change-feed client.
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `LEADERBOARD_DATABASE` override, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.finish(std::env::var(DATABASE_ENV).ok())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Defaults with environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden values fail validation.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        Self::default().finish(std::env::var(DATABASE_ENV).ok())
    }

    fn finish(mut self, database_override: Option<String>) -> Result<Self> {
        if let Some(path) = database_override.filter(|p| !p.trim().is_empty()) {
            self.database.path = path;
        }
        self.validate()?;
        Ok(self)
    }

    /// Render as TOML, for `config show`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Other(e.to_string()).into())
    }

    /// Validate configuration values.
    ///
    /// Checks that required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "server.host" }.into());
        }
        if self.server.broadcast_capacity == 0 {
            return Err(invalid("server.broadcast_capacity", "must be greater than 0"));
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database.path" }.into());
        }
        if !self.logging.is_known_format() {
            return Err(invalid("logging.format", "must be \"pretty\" or \"json\""));
        }

        let dashboard = &self.dashboard;
        if dashboard.refresh_interval_secs == 0 {
            return Err(invalid("dashboard.refresh_interval_secs", "must be greater than 0"));
        }
        if dashboard.recompute_interval_secs == 0 {
            return Err(invalid("dashboard.recompute_interval_secs", "must be greater than 0"));
        }
        if dashboard.request_timeout_secs == 0 {
            return Err(invalid("dashboard.request_timeout_secs", "must be greater than 0"));
        }
        if dashboard.retry_max_attempts == 0 {
            return Err(invalid("dashboard.retry_max_attempts", "must be greater than 0"));
        }
        if matches!(dashboard.working_days_override, Some(days) if days > 31) {
            return Err(invalid("dashboard.working_days_override", "must be 31 or less"));
        }
        if dashboard.server_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "dashboard.server_url",
            }
            .into());
        }

        let alerts = &self.alerts;
        if alerts.check_interval_secs == 0 {
            return Err(invalid("alerts.check_interval_secs", "must be greater than 0"));
        }
        if alerts.working_hours_end > 24 || alerts.start_hour > 23 {
            return Err(invalid("alerts.working_hours", "hours must be within 0..=24"));
        }
        if alerts.working_hours_start >= alerts.working_hours_end {
            return Err(invalid(
                "alerts.working_hours",
                "working_hours_start must be before working_hours_end",
            ));
        }

        let speech = &self.speech;
        if !(speech.rate > 0.0 && speech.rate <= 10.0) {
            return Err(invalid("speech.rate", "must be greater than 0 and at most 10"));
        }
        if !(0.0..=2.0).contains(&speech.pitch) {
            return Err(invalid("speech.pitch", "must be between 0 and 2"));
        }
        if !(0.0..=1.0).contains(&speech.volume) {
            return Err(invalid("speech.volume", "must be between 0 and 1"));
        }
        if speech.program.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "speech.program",
            }
            .into());
        }

        if self.feed.reconnect_delay_ms == 0 {
            return Err(invalid("feed.reconnect_delay_ms", "must be greater than 0"));
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WeekendPolicy;
    use crate::error::Error;
    use crate::infrastructure::config::speech::SpeechBackend;

    fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.finish(None)
    }

    fn invalid_field(result: Result<Config>) -> &'static str {
        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.dashboard.weekend_policy, WeekendPolicy::SundayOnly);
        assert_eq!(config.dashboard.refresh_interval_secs, 5);
        assert_eq!(config.dashboard.recompute_interval_secs, 60);
        assert_eq!(config.alerts.check_interval_secs, 300);
        assert_eq!(config.alerts.cooldown_minutes, 15);
        assert_eq!(config.feed.reconnect_delay_ms, 3000);
        assert_eq!(config.speech.backend, SpeechBackend::Command);
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse(
            r#"
            [server]
            port = 9000

            [dashboard]
            weekend_policy = "saturday_and_sunday"
            working_days_override = 20

            [speech]
            backend = "log"
            rate = 1.2
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.dashboard.calendar().policy(),
            WeekendPolicy::SaturdayAndSunday
        );
        assert_eq!(config.dashboard.calendar().override_total(), Some(20));
        assert_eq!(config.speech.backend, SpeechBackend::Log);
        assert!((config.speech.voice_params().rate - 1.2).abs() < f32::EPSILON);
    }

    #[test]
    fn database_override_replaces_path() {
        let config: Config = toml::from_str("[database]\npath = \"a.db\"").unwrap();
        let config = config.finish(Some("b.db".into())).unwrap();
        assert_eq!(config.database.path, "b.db");
    }

    #[test]
    fn blank_database_override_is_ignored() {
        let config: Config = toml::from_str("[database]\npath = \"a.db\"").unwrap();
        let config = config.finish(Some("  ".into())).unwrap();
        assert_eq!(config.database.path, "a.db");
    }

    #[test]
    fn zero_intervals_are_rejected() {
        assert_eq!(
            invalid_field(parse("[dashboard]\nrefresh_interval_secs = 0")),
            "dashboard.refresh_interval_secs"
        );
        assert_eq!(
            invalid_field(parse("[alerts]\ncheck_interval_secs = 0")),
            "alerts.check_interval_secs"
        );
        assert_eq!(
            invalid_field(parse("[feed]\nreconnect_delay_ms = 0")),
            "feed.reconnect_delay_ms"
        );
    }

    #[test]
    fn inverted_working_hours_are_rejected() {
        let result = parse("[alerts]\nworking_hours_start = 18\nworking_hours_end = 9");
        assert_eq!(invalid_field(result), "alerts.working_hours");
    }

    #[test]
    fn out_of_range_speech_is_rejected() {
        assert_eq!(invalid_field(parse("[speech]\nvolume = 1.5")), "speech.volume");
        assert_eq!(invalid_field(parse("[speech]\nrate = 0.0")), "speech.rate");
        assert_eq!(invalid_field(parse("[speech]\npitch = -1.0")), "speech.pitch");
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert_eq!(
            invalid_field(parse("[logging]\nformat = \"xml\"")),
            "logging.format"
        );
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = parse("[server\nport = 1");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = parse("[dashboard]\nworking_days_override = 22").unwrap();
        let rendered = config.to_toml().unwrap();
        assert_eq!(parse(&rendered).unwrap(), config);
    }

    #[test]
    fn alert_policy_reflects_config() {
        let config = parse("[alerts]\ncooldown_minutes = 30\nstart_hour = 11").unwrap();
        let policy = config.alerts.policy();
        assert_eq!(policy.start_hour, 11);
        assert_eq!(policy.cooldown, chrono::Duration::minutes(30));
    }
}
