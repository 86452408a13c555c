use std::net::SocketAddr;
use std::sync::Arc;

use leaderboard::adapter::inbound::http::{self, AppState};
use leaderboard::adapter::outbound::memory::MemoryStore;
use leaderboard::application::broadcast::ChangeHub;
use leaderboard::application::leaderboard::LeaderboardService;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A server on an ephemeral port over an in-memory store.
pub struct TestServer {
    pub addr: SocketAddr,
    pub service: LeaderboardService,
    pub hub: ChangeHub,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let hub = ChangeHub::default();
        let service = LeaderboardService::new(Arc::new(MemoryStore::new()), Arc::new(hub.clone()));
        let state = AppState::without_scheduler(service.clone(), hub.clone());
        let app = http::router(state, &[]);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            http::serve(listener, app, async {
                let _ = stopped.await;
            })
            .await
            .expect("serve");
        });

        Self {
            addr,
            service,
            hub,
            stop: Some(stop),
            task: Some(task),
        }
    }

    pub fn http_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}
