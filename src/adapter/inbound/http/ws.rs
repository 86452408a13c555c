//! `/ws` change feed.
//!
//! Each connection gets its own hub subscription and receives every
//! [`ChangeEvent`] as a JSON text frame. A client that falls behind the hub
//! capacity skips the missed events and keeps streaming.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tracing::{debug, warn};

use super::state::AppState;
use crate::domain::ChangeEvent;

pub async fn upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let changes = state.hub.subscribe();
    ws.on_upgrade(move |socket| stream_changes(socket, changes))
}

async fn stream_changes(mut socket: WebSocket, mut changes: Receiver<ChangeEvent>) {
    debug!("Change feed client connected");
    loop {
        tokio::select! {
            event = changes.recv() => match event {
                Ok(event) => {
                    let json = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(error = %e, kind = event.kind(), "Failed to encode change");
                            continue;
                        }
                    };
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Change feed client lagged");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    debug!("Change feed client disconnected");
}
