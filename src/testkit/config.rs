//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::speech::SpeechBackend;

/// In-memory database, log-only speech and an ephemeral port.
pub fn in_memory() -> Config {
    let mut config = Config::default();
    config.database.path = ":memory:".to_string();
    config.server.port = 0;
    config.speech.backend = SpeechBackend::Log;
    config
}

/// [`in_memory`] backed by a SQLite file at `path`.
pub fn with_database(path: &std::path::Path) -> Config {
    let mut config = in_memory();
    config.database.path = path.to_string_lossy().into_owned();
    config
}
