//! Live change-feed client.
//!
//! Follows a server's `/ws` endpoint and hands each [`ChangeEvent`] to a
//! callback. When the connection drops, the client waits a fixed delay and
//! reconnects, until shut down.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, trace, warn};

use crate::domain::ChangeEvent;
use crate::error::Result;

/// Default wait between a disconnect and the next connection attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// How a single connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disconnect {
    /// The server closed the socket or the stream ended.
    Closed,
    /// Shutdown was requested while connected.
    Shutdown,
}

/// Reconnecting WebSocket client for the change feed.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    url: String,
    reconnect_delay: Duration,
}

impl ChangeFeed {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }

    #[must_use]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connect once and dispatch events until the socket closes.
    ///
    /// Frames that are not valid change events are logged and skipped.
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established or a frame
    /// cannot be read.
    pub async fn run_once<F>(
        &self,
        on_event: &mut F,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<Disconnect>
    where
        F: FnMut(ChangeEvent) + Send,
    {
        let (mut ws, response) = connect_async(self.url.as_str()).await?;
        info!(url = %self.url, status = %response.status(), "Change feed connected");

        loop {
            let frame = tokio::select! {
                frame = ws.next() => frame,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        let _ = ws.close(None).await;
                        return Ok(Disconnect::Shutdown);
                    }
                    continue;
                }
            };

            match frame {
                Some(Ok(Message::Text(text))) => {
                    trace!(bytes = text.len(), "Received change frame");
                    match serde_json::from_str::<ChangeEvent>(&text) {
                        Ok(event) => on_event(event),
                        Err(e) => warn!(error = %e, bytes = text.len(), "Ignoring malformed change event"),
                    }
                }
                Some(Ok(Message::Ping(payload))) => {
                    ws.send(Message::Pong(payload)).await?;
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "Change feed closed by server");
                    return Ok(Disconnect::Closed);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(Disconnect::Closed),
            }
        }
    }

    /// Follow the feed until `shutdown` flips to `true`.
    ///
    /// Connection failures and disconnects are logged; the next attempt
    /// starts after the fixed reconnect delay.
    pub async fn run<F>(&self, mut on_event: F, mut shutdown: watch::Receiver<bool>)
    where
        F: FnMut(ChangeEvent) + Send,
    {
        loop {
            if *shutdown.borrow() {
                return;
            }

            match self.run_once(&mut on_event, &mut shutdown).await {
                Ok(Disconnect::Shutdown) => return,
                Ok(Disconnect::Closed) => info!("Change feed disconnected"),
                Err(e) => warn!(url = %self.url, error = %e, "Change feed connection failed"),
            }

            debug!(
                delay_ms = self.reconnect_delay.as_millis() as u64,
                "Reconnecting change feed after delay"
            );
            tokio::select! {
                _ = sleep(self.reconnect_delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return;
                    }
                }
            }
        }
    }
}
