//! Shared handler state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::broadcast::ChangeHub;
use crate::application::leaderboard::LeaderboardService;
use crate::domain::DailyTarget;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: LeaderboardService,
    pub hub: ChangeHub,
    /// Latest targets published by the dashboard scheduler.
    pub targets: watch::Receiver<Arc<Vec<DailyTarget>>>,
}

impl AppState {
    /// State without a scheduler; `/api/dashboard/targets` stays empty.
    #[must_use]
    pub fn without_scheduler(service: LeaderboardService, hub: ChangeHub) -> Self {
        let (_tx, targets) = watch::channel(Arc::new(Vec::new()));
        Self {
            service,
            hub,
            targets,
        }
    }
}
