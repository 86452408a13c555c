//! `/api/agents` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::error::ApiResult;
use super::state::AppState;
use crate::domain::{Agent, AgentId, AgentUpdate, NewAgent};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Agent>>> {
    Ok(Json(state.service.list_agents().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<AgentId>) -> ApiResult<Json<Agent>> {
    Ok(Json(state.service.get_agent(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewAgent>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Agent>)> {
    let Json(input) = payload?;
    let agent = state.service.create_agent(input).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<AgentId>,
    payload: Result<Json<AgentUpdate>, JsonRejection>,
) -> ApiResult<Json<Agent>> {
    let Json(update) = payload?;
    Ok(Json(state.service.update_agent(&id, update).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<AgentId>) -> ApiResult<StatusCode> {
    state.service.delete_agent(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
