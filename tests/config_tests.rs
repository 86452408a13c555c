//! Configuration files on disk.

use std::fs;

use leaderboard::domain::WeekendPolicy;
use leaderboard::error::{ConfigError, Error};
use leaderboard::infrastructure::config::settings::Config;
use leaderboard::infrastructure::config::speech::SpeechBackend;

const TEMPLATE: &str = include_str!("../config.toml.example");

#[test]
fn shipped_template_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, TEMPLATE).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.dashboard.weekend_policy, WeekendPolicy::SundayOnly);
    assert_eq!(config.alerts.cooldown_minutes, 15);
    assert_eq!(config.feed.resolve_url(&config.dashboard.server_url), "ws://127.0.0.1:8080/ws");
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[speech]\nbackend = \"none\"\n\n[dashboard]\nserver_url = \"https://board.example\"\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.speech.backend, SpeechBackend::None);
    assert_eq!(config.server.port, 8080);
    assert_eq!(
        config.feed.resolve_url(&config.dashboard.server_url),
        "wss://board.example/ws"
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn invalid_values_name_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[alerts]\nstart_hour = 30\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("alerts.working_hours"), "{err}");
}
