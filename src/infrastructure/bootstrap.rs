//! Composition root: builds adapters and services from configuration.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapter::outbound::memory::MemoryStore;
use crate::adapter::outbound::speech::{CommandSpeech, LogSpeech, NullSpeech};
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteStore};
use crate::application::broadcast::ChangeHub;
use crate::application::leaderboard::LeaderboardService;
use crate::application::scheduler::SchedulerDeps;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::speech::{SpeechBackend, SpeechConfig};
use crate::port::{SnapshotSource, SpeechSynthesizer, Store, SystemClock};

const IN_MEMORY: &str = ":memory:";

/// Open the configured SQLite database and run pending migrations.
///
/// The parent directory is created if missing.
pub fn open_store(config: &Config) -> Result<Arc<dyn Store>> {
    let path = config.database.path.as_str();
    if path != IN_MEMORY {
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }
    let pool = create_pool(path)?;
    run_migrations(&pool)?;
    info!(path, "Database ready");
    Ok(Arc::new(SqliteStore::new(pool)))
}

/// A fresh in-memory store, for `serve --memory`.
#[must_use]
pub fn memory_store() -> Arc<dyn Store> {
    Arc::new(MemoryStore::new())
}

/// The configured speech back-end.
#[must_use]
pub fn build_speech(config: &SpeechConfig) -> Arc<dyn SpeechSynthesizer> {
    debug!(backend = ?config.backend, "Building speech back-end");
    match config.backend {
        SpeechBackend::Command => Arc::new(
            CommandSpeech::new(config.program.clone()).with_voice(config.voice.clone()),
        ),
        SpeechBackend::Log => Arc::new(LogSpeech),
        SpeechBackend::None => Arc::new(NullSpeech),
    }
}

/// Admin service and the hub its events go to.
#[derive(Clone)]
pub struct Services {
    pub leaderboard: LeaderboardService,
    pub hub: ChangeHub,
}

/// Wire the leaderboard service to a store and a fresh change hub.
#[must_use]
pub fn build_services(config: &Config, store: Arc<dyn Store>) -> Services {
    let hub = ChangeHub::new(config.server.broadcast_capacity);
    let leaderboard = LeaderboardService::new(store, Arc::new(hub.clone()));
    Services { leaderboard, hub }
}

/// Scheduler collaborators from configuration.
///
/// With alerts disabled, speech is replaced by [`NullSpeech`] and the
/// alert window is emptied so no alert is raised.
#[must_use]
pub fn scheduler_deps(config: &Config, source: Arc<dyn SnapshotSource>) -> SchedulerDeps {
    let mut policy = config.alerts.policy();
    let speech = if config.alerts.enabled {
        build_speech(&config.speech)
    } else {
        policy.start_hour = 24;
        Arc::new(NullSpeech)
    };
    SchedulerDeps {
        source,
        speech,
        clock: Arc::new(SystemClock),
        calendar: config.dashboard.calendar(),
        policy,
        voice: config.speech.voice_params(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::scheduler::StoreSnapshotSource;
    use crate::port::{TeamStore, Utterance};

    #[tokio::test]
    async fn open_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir
            .path()
            .join("nested")
            .join("board.db")
            .to_string_lossy()
            .into_owned();

        let store = open_store(&config).unwrap();
        assert!(store.list_teams().await.unwrap().is_empty());
        assert!(dir.path().join("nested").join("board.db").exists());
    }

    #[test]
    fn speech_none_is_unavailable() {
        let config = SpeechConfig {
            backend: SpeechBackend::None,
            ..SpeechConfig::default()
        };
        assert!(build_speech(&config).speak(Utterance::alert("x")).is_err());
    }

    #[test]
    fn disabled_alerts_never_fire() {
        let mut config = Config::default();
        config.alerts.enabled = false;
        let source = Arc::new(StoreSnapshotSource::new(memory_store()));
        let deps = scheduler_deps(&config, source);
        let noon = chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert!(!deps.policy.in_alert_window(noon));
    }
}
