//! Default locations.
//!
//! All data lives under `~/.leaderboard/`:
//! - `~/.leaderboard/config.toml` - main configuration
//! - `~/.leaderboard/leaderboard.db` - SQLite database

use std::path::PathBuf;

/// The leaderboard home directory (`~/.leaderboard/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".leaderboard")
}

/// The default config file path (`~/.leaderboard/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_under_leaderboard_home() {
        let config = default_config();
        assert!(config.starts_with(home_dir()));
        assert!(config.to_string_lossy().contains(".leaderboard"));
    }
}
