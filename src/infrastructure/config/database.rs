//! Database location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides `database.path`.
pub const DATABASE_ENV: &str = "LEADERBOARD_DATABASE";

/// SQLite database settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file, or `:memory:`.
    #[serde(default = "default_database_path")]
    pub path: String,
}

/// `~/.leaderboard/leaderboard.db`, or `leaderboard.db` when there is no
/// home directory.
#[must_use]
pub fn default_database_path() -> String {
    dirs::home_dir()
        .map(|home| home.join(".leaderboard").join("leaderboard.db"))
        .unwrap_or_else(|| PathBuf::from("leaderboard.db"))
        .to_string_lossy()
        .into_owned()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}
