//! Change-feed client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the dashboard follows a server's change feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// WebSocket URL. Derived from `dashboard.server_url` when unset.
    #[serde(default)]
    pub url: Option<String>,
    /// Wait before reconnecting after a disconnect (default: 3000).
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

const fn default_true() -> bool {
    true
}

const fn default_reconnect_delay_ms() -> u64 {
    3000
}

impl FeedConfig {
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    /// The feed URL, or `server_url` with a `ws`/`wss` scheme and `/ws` path.
    #[must_use]
    pub fn resolve_url(&self, server_url: &str) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let base = server_url.trim_end_matches('/');
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_string()
        };
        format!("{base}/ws")
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            url: None,
            reconnect_delay_ms: default_reconnect_delay_ms(),
        }
    }
}
