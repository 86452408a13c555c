//! Read models for the TV dashboard.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::error::ApiResult;
use super::state::AppState;
use crate::domain::{DailyTarget, LeaderboardEntry, TeamProgressEntry};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn leaderboard(State(state): State<AppState>) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.service.leaderboard().await?))
}

pub async fn progress(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamProgressEntry>>> {
    Ok(Json(state.service.team_progress().await?))
}

/// Targets from the scheduler's most recent recompute.
pub async fn targets(State(state): State<AppState>) -> Json<Vec<DailyTarget>> {
    Json(state.targets.borrow().as_ref().clone())
}
