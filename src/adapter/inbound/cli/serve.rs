//! Handler for `serve`.
//!
//! Runs the REST/WebSocket server over the local store. Unless disabled, a
//! server-side dashboard scheduler computes targets for
//! `/api/dashboard/targets` and speaks lagging-team alerts; admin writes
//! invalidate its snapshot through the change hub.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::http::{self, AppState};
use crate::application::broadcast::ChangeHub;
use crate::application::invalidation::refreshes_dashboard;
use crate::application::scheduler::{DashboardScheduler, StoreSnapshotSource};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute `serve`.
pub async fn execute(mut config: Config, args: &ServeArgs) -> Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    let addr = config.server.socket_addr()?;

    let store = if args.memory {
        bootstrap::memory_store()
    } else {
        bootstrap::open_store(&config)?
    };
    let services = bootstrap::build_services(&config, Arc::clone(&store));

    let scheduler = (!args.no_alerts).then(|| {
        let source = Arc::new(StoreSnapshotSource::new(Arc::clone(&store)));
        DashboardScheduler::start(
            bootstrap::scheduler_deps(&config, source),
            config.dashboard.scheduler(config.alerts.check_interval()),
        )
    });

    let state = match &scheduler {
        Some(scheduler) => AppState {
            service: services.leaderboard.clone(),
            hub: services.hub.clone(),
            targets: scheduler.watch_targets(),
        },
        None => AppState::without_scheduler(services.leaderboard.clone(), services.hub.clone()),
    };
    let background: Vec<JoinHandle<()>> = scheduler
        .as_ref()
        .map(|scheduler| {
            vec![
                spawn_invalidation(&services.hub, scheduler),
                spawn_alert_printer(scheduler),
            ]
        })
        .unwrap_or_default();

    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Server");
    output::field("Listening", format!("http://{local_addr}"));
    output::field("Change feed", format!("ws://{local_addr}/ws"));
    output::field(
        "Storage",
        if args.memory {
            "memory".to_string()
        } else {
            config.database.path.clone()
        },
    );
    output::field(
        "Alerts",
        if scheduler.is_some() && config.alerts.enabled {
            format!("every {}s", config.alerts.check_interval_secs)
        } else {
            "off".to_string()
        },
    );

    let app = http::router(state, &config.server.cors_origins);
    http::serve(listener, app, shutdown_signal()).await?;

    for task in background {
        task.abort();
    }
    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await;
    }
    output::success("Server stopped");
    Ok(())
}

/// Reload the scheduler snapshot when an admin write touches teams or agents.
fn spawn_invalidation(hub: &ChangeHub, scheduler: &DashboardScheduler) -> JoinHandle<()> {
    let mut changes = hub.subscribe();
    let invalidator = scheduler.invalidator();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(event) => {
                    if refreshes_dashboard(&event) {
                        invalidator.notify_one();
                    }
                }
                Err(RecvError::Lagged(_)) => invalidator.notify_one(),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn spawn_alert_printer(scheduler: &DashboardScheduler) -> JoinHandle<()> {
    let mut alerts = scheduler.subscribe_alerts();
    tokio::spawn(async move {
        loop {
            match alerts.recv().await {
                Ok(alert) => {
                    output::alert(&alert.raised_at.format("%H:%M:%S").to_string(), &alert.message());
                }
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
