//! Source of team/agent snapshots for the dashboard computation.

use async_trait::async_trait;

use crate::domain::{Agent, Team};
use crate::error::Result;

/// Teams and agents captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    pub agents: Vec<Agent>,
}

/// Loads fresh snapshots. Called on every poll and after invalidation.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load(&self) -> Result<Snapshot>;
}
