//! End-to-end tests over a real socket: REST writes, the `/ws` change feed
//! and the HTTP snapshot source.

mod support;

use std::time::Duration;

use leaderboard::adapter::outbound::feed::ChangeFeed;
use leaderboard::adapter::outbound::http::HttpSnapshotSource;
use leaderboard::application::invalidation::{queries_for, refreshes_dashboard, QueryKey};
use leaderboard::domain::{ChangeAction, ChangeEvent};
use leaderboard::port::SnapshotSource;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use support::server::TestServer;
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;
use url::Url;

async fn post(client: &reqwest::Client, url: String, body: Value) -> Value {
    let response = client.post(url).json(&body).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    response.json().await.unwrap()
}

#[tokio::test]
async fn sale_reaches_feed_and_snapshot() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let base = server.http_url();

    let team = post(
        &client,
        format!("{base}api/teams"),
        json!({"name": "Falcons", "color": "#f00", "monthly_volume_target": "50000", "monthly_unit_target": 20}),
    )
    .await;
    let agent = post(
        &client,
        format!("{base}api/agents"),
        json!({"name": "Dana", "team_id": team["id"]}),
    )
    .await;

    let (events_tx, mut events) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let feed = ChangeFeed::new(server.ws_url()).with_reconnect_delay(Duration::from_millis(20));
    let feed_task = tokio::spawn(async move {
        feed.run(
            move |event| {
                let _ = events_tx.send(event);
            },
            shutdown_rx,
        )
        .await;
    });

    // The feed subscribes on upgrade; wait until the hub sees the client.
    timeout(Duration::from_secs(5), async {
        while server.hub.receiver_count() == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    post(
        &client,
        format!("{base}api/sales"),
        json!({"agent_id": agent["id"], "amount": "1200", "units": 2}),
    )
    .await;

    let sale = timeout(Duration::from_secs(5), events.recv()).await.unwrap().unwrap();
    assert!(matches!(
        sale,
        ChangeEvent::Sale { action: ChangeAction::Created, .. }
    ));
    assert!(refreshes_dashboard(&sale));
    assert!(queries_for(&sale).contains(&QueryKey::Leaderboard));

    let celebration = timeout(Duration::from_secs(5), events.recv()).await.unwrap().unwrap();
    let ChangeEvent::Celebration(celebration) = celebration else {
        panic!("expected celebration, got {celebration:?}");
    };
    assert_eq!(celebration.agent_name, "Dana");
    assert_eq!(celebration.team_name.as_deref(), Some("Falcons"));
    assert_eq!(celebration.amount, dec!(1200));

    let source = HttpSnapshotSource::new(Url::parse(&base).unwrap(), Duration::from_secs(5));
    let snapshot = source.load().await.unwrap();
    assert_eq!(snapshot.teams.len(), 1);
    assert_eq!(snapshot.agents[0].current_volume, dec!(1200));
    assert_eq!(snapshot.agents[0].current_units, 2);

    shutdown_tx.send(true).unwrap();
    feed_task.await.unwrap();
    server.stop().await;
}

#[tokio::test]
async fn deleting_a_sale_rolls_back_counters() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let base = server.http_url();

    let agent = post(&client, format!("{base}api/agents"), json!({"name": "Eli"})).await;
    let sale = post(
        &client,
        format!("{base}api/sales"),
        json!({"agent_id": agent["id"], "amount": 300}),
    )
    .await;

    let response = client
        .delete(format!("{base}api/sales/{}", sale["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    let agents: Value = client
        .get(format!("{base}api/agents"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(agents[0]["current_units"], 0);

    let again = client
        .delete(format!("{base}api/sales/{}", sale["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), reqwest::StatusCode::NOT_FOUND);
    server.stop().await;
}

#[tokio::test]
async fn progress_sums_agents_per_team() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let base = server.http_url();

    let team = post(
        &client,
        format!("{base}api/teams"),
        json!({"name": "Hawks", "monthly_volume_target": 1000, "monthly_unit_target": 10}),
    )
    .await;
    for name in ["A", "B"] {
        let agent = post(
            &client,
            format!("{base}api/agents"),
            json!({"name": name, "team_id": team["id"]}),
        )
        .await;
        post(
            &client,
            format!("{base}api/sales"),
            json!({"agent_id": agent["id"], "amount": 100}),
        )
        .await;
    }

    let progress: Value = client
        .get(format!("{base}api/dashboard/progress"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(progress[0]["team_name"], "Hawks");
    assert_eq!(progress[0]["total_units"], 2);
    server.stop().await;
}
