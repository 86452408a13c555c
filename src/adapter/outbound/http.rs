//! Snapshot source backed by a remote leaderboard server's REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{Agent, Team};
use crate::error::Result;
use crate::port::{Snapshot, SnapshotSource};

/// Fetches `/api/teams` and `/api/agents` from a server.
///
/// Numeric fields in the responses are parsed leniently, so a team whose
/// target arrives as `"50000"` or `null` still loads.
pub struct HttpSnapshotSource {
    http: HttpClient,
    base_url: Url,
    retry_max_attempts: u32,
    retry_backoff: Duration,
}

impl HttpSnapshotSource {
    #[must_use]
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self {
            http,
            base_url,
            retry_max_attempts: 1,
            retry_backoff: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.retry_max_attempts = max_attempts.max(1);
        self.retry_backoff = backoff;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_with_retry<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        let mut attempt = 0;

        loop {
            attempt += 1;
            let result = match self.http.get(url.clone()).send().await {
                Ok(response) => match response.error_for_status() {
                    Ok(response) => response.json::<T>().await,
                    Err(err) => return Err(err.into()),
                },
                Err(err) => Err(err),
            };

            match result {
                Ok(parsed) => return Ok(parsed),
                Err(err) if attempt < self.retry_max_attempts && Self::should_retry(&err) => {
                    warn!(
                        attempt,
                        max_attempts = self.retry_max_attempts,
                        url = %url,
                        error = %err,
                        "Snapshot request failed, retrying"
                    );
                    if !self.retry_backoff.is_zero() {
                        sleep(self.retry_backoff).await;
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn load(&self) -> Result<Snapshot> {
        let teams: Vec<Team> = self.get_with_retry("api/teams").await?;
        let agents: Vec<Agent> = self.get_with_retry("api/agents").await?;
        debug!(
            teams = teams.len(),
            agents = agents.len(),
            "Fetched snapshot"
        );
        Ok(Snapshot { teams, agents })
    }
}
