//! `/api/teams` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::error::ApiResult;
use super::state::AppState;
use crate::domain::{NewTeam, Team, TeamId, TeamUpdate};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Team>>> {
    Ok(Json(state.service.list_teams().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<TeamId>) -> ApiResult<Json<Team>> {
    Ok(Json(state.service.get_team(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewTeam>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    let Json(input) = payload?;
    let team = state.service.create_team(input).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    payload: Result<Json<TeamUpdate>, JsonRejection>,
) -> ApiResult<Json<Team>> {
    let Json(update) = payload?;
    Ok(Json(state.service.update_team(&id, update).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<TeamId>) -> ApiResult<StatusCode> {
    state.service.delete_team(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
