//! Handler for `dashboard`: the TV client.
//!
//! Polls a remote server for snapshots, follows its change feed so edits
//! show up without waiting for the next poll, prints targets after every
//! recompute and speaks alerts for lagging teams.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::Url;

use crate::adapter::inbound::cli::command::DashboardArgs;
use crate::adapter::inbound::cli::{output, targets};
use crate::adapter::outbound::feed::ChangeFeed;
use crate::adapter::outbound::http::HttpSnapshotSource;
use crate::application::invalidation::refreshes_dashboard;
use crate::application::scheduler::DashboardScheduler;
use crate::domain::{ChangeEvent, DailyTarget};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Parse `raw` as a base URL whose path ends in `/`, so relative API paths
/// join beneath it.
pub fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn describe(event: &ChangeEvent) -> Option<String> {
    match event {
        ChangeEvent::Celebration(c) => Some(match &c.team_name {
            Some(team) => format!("{} ({team}) sold {} x{}", c.agent_name, c.amount, c.units),
            None => format!("{} sold {} x{}", c.agent_name, c.amount, c.units),
        }),
        _ => None,
    }
}

/// Print one recompute. A failed write is logged and the dashboard keeps
/// running.
fn show_targets<F>(current: &[DailyTarget], print: F)
where
    F: FnOnce(&[DailyTarget]) -> Result<()>,
{
    if let Err(e) = print(current) {
        warn!(error = %e, teams = current.len(), "Failed to print targets");
    }
}

/// Execute `dashboard`.
pub async fn execute(config: &Config, args: &DashboardArgs) -> Result<()> {
    let server_url = args
        .server
        .clone()
        .unwrap_or_else(|| config.dashboard.server_url.clone());
    let source = HttpSnapshotSource::new(base_url(&server_url)?, config.dashboard.request_timeout())
        .with_retry(
            config.dashboard.retry_max_attempts,
            config.dashboard.retry_backoff(),
        );

    let scheduler = DashboardScheduler::start(
        bootstrap::scheduler_deps(config, Arc::new(source)),
        config.dashboard.scheduler(config.alerts.check_interval()),
    );

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Dashboard");
    output::field("Server", &server_url);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let feed_task = if config.feed.enabled && !args.no_feed {
        let feed = ChangeFeed::new(config.feed.resolve_url(&server_url))
            .with_reconnect_delay(config.feed.reconnect_delay());
        output::field("Change feed", feed.url());
        let invalidator = scheduler.invalidator();
        Some(tokio::spawn(async move {
            feed.run(
                move |event| {
                    debug!(kind = event.kind(), "Change received");
                    if refreshes_dashboard(&event) {
                        invalidator.notify_one();
                    }
                    if let Some(message) = describe(&event) {
                        let now = chrono::Local::now().format("%H:%M:%S").to_string();
                        output::event(&now, event.kind(), &message);
                    }
                },
                shutdown_rx,
            )
            .await;
        }))
    } else {
        output::field("Change feed", "off");
        None
    };

    let mut target_updates = scheduler.watch_targets();
    let mut alerts = scheduler.subscribe_alerts();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    warn!(error = %e, "Ctrl-C handler failed");
                }
                info!("Shutdown signal received");
                break;
            }
            changed = target_updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = Arc::clone(&*target_updates.borrow_and_update());
                if !output::is_json() {
                    let now = chrono::Local::now().format("%H:%M:%S");
                    output::section(&format!("Targets at {now}"));
                }
                show_targets(&current, targets::print);
            }
            alert = alerts.recv() => match alert {
                Ok(alert) => {
                    output::alert(&alert.raised_at.format("%H:%M:%S").to_string(), &alert.message());
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Missed alerts"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    let _ = shutdown_tx.send(true);
    if let Some(task) = feed_task {
        if let Err(e) = task.await {
            warn!(error = %e, "Change feed task ended abnormally");
        }
    }
    scheduler.shutdown().await;
    output::success("Dashboard stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgentId, Celebration};
    use rust_decimal_macros::dec;

    #[test]
    fn base_url_gains_trailing_slash() {
        assert_eq!(
            base_url("http://tv.local:8080/board").unwrap().as_str(),
            "http://tv.local:8080/board/"
        );
        assert_eq!(
            base_url("http://tv.local:8080").unwrap().as_str(),
            "http://tv.local:8080/"
        );
        assert!(base_url("not a url").is_err());
    }

    #[test]
    fn celebrations_are_described() {
        let event = ChangeEvent::Celebration(Celebration {
            agent_id: AgentId::from("a1"),
            agent_name: "Dana".into(),
            team_name: Some("Falcons".into()),
            amount: dec!(1200),
            units: 2,
        });
        assert_eq!(describe(&event).unwrap(), "Dana (Falcons) sold 1200 x2");
    }

    #[test]
    fn print_failure_does_not_stop_the_dashboard() {
        let mut attempts = 0;
        show_targets(&[], |_| {
            attempts += 1;
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed").into())
        });
        assert_eq!(attempts, 1);

        show_targets(&[], |targets| {
            assert!(targets.is_empty());
            Ok(())
        });
    }
}
