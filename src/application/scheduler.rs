//! Dashboard scheduler: the periodic refresh, recompute and alert loops.
//!
//! Three tasks share state through `watch` channels:
//!
//! ```text
//!  refresh (poll + invalidate) ──▶ snapshot ──▶ recompute (tick + change) ──▶ targets
//!                                                                              │
//!                                                      alert (tick) ◀──────────┘
//! ```
//!
//! The alert task owns the [`AlertDispatcher`], so its cooldown state needs
//! no locking. [`DashboardScheduler::shutdown`] stops the tasks gracefully;
//! dropping the scheduler aborts them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::application::dashboard::compute_daily_targets;
use crate::domain::{AlertDispatcher, AlertPolicy, DailyTarget, LaggingAlert, WorkingDayCalendar};
use crate::error::Result;
use crate::port::{Clock, Snapshot, SnapshotSource, SpeechSynthesizer, Store, Voice};

/// Loop periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub refresh_interval: Duration,
    pub recompute_interval: Duration,
    pub alert_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(5),
            recompute_interval: Duration::from_secs(60),
            alert_interval: Duration::from_secs(300),
        }
    }
}

/// Collaborators the scheduler drives.
pub struct SchedulerDeps {
    pub source: Arc<dyn SnapshotSource>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub clock: Arc<dyn Clock>,
    pub calendar: WorkingDayCalendar,
    pub policy: AlertPolicy,
    pub voice: Voice,
}

/// Reads snapshots straight from a local store.
pub struct StoreSnapshotSource {
    store: Arc<dyn Store>,
}

impl StoreSnapshotSource {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SnapshotSource for StoreSnapshotSource {
    async fn load(&self) -> Result<Snapshot> {
        let teams = self.store.list_teams().await?;
        let agents = self.store.list_agents().await?;
        Ok(Snapshot { teams, agents })
    }
}

/// Owner of the dashboard's background tasks.
pub struct DashboardScheduler {
    invalidate: Arc<Notify>,
    snapshot: watch::Receiver<Arc<Snapshot>>,
    targets: watch::Receiver<Arc<Vec<DailyTarget>>>,
    alerts: broadcast::Sender<LaggingAlert>,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardScheduler {
    /// Spawn the refresh, recompute and alert tasks on the current runtime.
    #[must_use]
    pub fn start(deps: SchedulerDeps, config: SchedulerConfig) -> Self {
        let invalidate = Arc::new(Notify::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(Snapshot::default()));
        let (targets_tx, targets_rx) = watch::channel(Arc::new(Vec::new()));
        let (alerts_tx, _) = broadcast::channel(64);

        let refresh = tokio::spawn(refresh_loop(
            deps.source,
            Arc::clone(&invalidate),
            snapshot_tx,
            config.refresh_interval,
            shutdown_rx.clone(),
        ));
        let recompute = tokio::spawn(recompute_loop(
            snapshot_rx.clone(),
            targets_tx,
            Arc::clone(&deps.clock),
            deps.calendar,
            config.recompute_interval,
            shutdown_rx.clone(),
        ));
        let alert = tokio::spawn(alert_loop(
            targets_rx.clone(),
            AlertDispatcher::new(deps.policy),
            deps.speech,
            deps.voice,
            deps.clock,
            alerts_tx.clone(),
            config.alert_interval,
            shutdown_rx,
        ));

        info!(
            refresh_secs = config.refresh_interval.as_secs_f64(),
            recompute_secs = config.recompute_interval.as_secs_f64(),
            alert_secs = config.alert_interval.as_secs_f64(),
            "Dashboard scheduler started"
        );

        Self {
            invalidate,
            snapshot: snapshot_rx,
            targets: targets_rx,
            alerts: alerts_tx,
            shutdown: shutdown_tx,
            tasks: vec![refresh, recompute, alert],
        }
    }

    /// Reload the snapshot now instead of waiting for the next poll.
    pub fn invalidate(&self) {
        self.invalidate.notify_one();
    }

    /// Handle for requesting reloads from another task.
    #[must_use]
    pub fn invalidator(&self) -> Arc<Notify> {
        Arc::clone(&self.invalidate)
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.borrow())
    }

    #[must_use]
    pub fn targets(&self) -> Arc<Vec<DailyTarget>> {
        Arc::clone(&*self.targets.borrow())
    }

    /// Receiver that wakes on every recompute.
    #[must_use]
    pub fn watch_targets(&self) -> watch::Receiver<Arc<Vec<DailyTarget>>> {
        self.targets.clone()
    }

    /// Alerts as they are raised.
    #[must_use]
    pub fn subscribe_alerts(&self) -> broadcast::Receiver<LaggingAlert> {
        self.alerts.subscribe()
    }

    /// Signal every task to stop and wait for them to finish.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                warn!(error = %e, "Scheduler task ended abnormally");
            }
        }
        info!("Dashboard scheduler stopped");
    }
}

impl Drop for DashboardScheduler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn refresh_loop(
    source: Arc<dyn SnapshotSource>,
    invalidate: Arc<Notify>,
    snapshot_tx: watch::Sender<Arc<Snapshot>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            result = shutdown.changed() => {
                if result.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
            _ = ticker.tick() => {}
            () = invalidate.notified() => {
                debug!("Snapshot invalidated");
                ticker.reset();
            }
        }

        match source.load().await {
            Ok(snapshot) => {
                let changed = snapshot_tx.send_if_modified(|current| {
                    if **current == snapshot {
                        false
                    } else {
                        *current = Arc::new(snapshot);
                        true
                    }
                });
                if changed {
                    debug!("Snapshot updated");
                }
            }
            Err(e) => warn!(error = %e, "Snapshot refresh failed, keeping previous data"),
        }
    }
}

async fn recompute_loop(
    mut snapshot_rx: watch::Receiver<Arc<Snapshot>>,
    targets_tx: watch::Sender<Arc<Vec<DailyTarget>>>,
    clock: Arc<dyn Clock>,
    calendar: WorkingDayCalendar,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            result = shutdown.changed() => {
                if result.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
            _ = ticker.tick() => {}
            result = snapshot_rx.changed() => {
                if result.is_err() {
                    break;
                }
            }
        }

        let snapshot = Arc::clone(&*snapshot_rx.borrow_and_update());
        let today = clock.now().date();
        let targets = compute_daily_targets(&snapshot, &calendar, today);
        debug!(
            teams = targets.len(),
            behind = targets.iter().filter(|t| t.is_behind_schedule).count(),
            "Targets recomputed"
        );
        targets_tx.send_replace(Arc::new(targets));
    }
}

async fn alert_loop(
    targets_rx: watch::Receiver<Arc<Vec<DailyTarget>>>,
    mut dispatcher: AlertDispatcher,
    speech: Arc<dyn SpeechSynthesizer>,
    voice: Voice,
    clock: Arc<dyn Clock>,
    alerts_tx: broadcast::Sender<LaggingAlert>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            result = shutdown.changed() => {
                if result.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
            _ = ticker.tick() => {}
        }

        let targets = Arc::clone(&*targets_rx.borrow());
        let now = clock.now();
        for alert in dispatcher.evaluate(&targets, now) {
            let message = alert.message();
            info!(
                team = %alert.team_name,
                volume_percent = %alert.volume_progress_percent,
                units_percent = %alert.units_progress_percent,
                "Team behind schedule"
            );
            if let Err(e) = speech.speak(voice.utter(message)) {
                warn!(team = %alert.team_name, error = %e, "Speech alert failed");
            }
            let _ = alerts_tx.send(alert);
        }
    }
}
