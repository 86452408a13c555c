//! `/api/announcements` handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::error::ApiResult;
use super::state::AppState;
use crate::domain::{Announcement, AnnouncementId, AnnouncementUpdate, NewAnnouncement};

#[derive(Debug, Default, Deserialize)]
pub struct AnnouncementsQuery {
    #[serde(default)]
    pub active: bool,
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<AnnouncementsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Announcement>>> {
    let Query(query) = query?;
    Ok(Json(state.service.list_announcements(query.active).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewAnnouncement>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Announcement>)> {
    let Json(input) = payload?;
    let announcement = state.service.create_announcement(input).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<AnnouncementId>,
    payload: Result<Json<AnnouncementUpdate>, JsonRejection>,
) -> ApiResult<Json<Announcement>> {
    let Json(update) = payload?;
    Ok(Json(state.service.update_announcement(&id, update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<AnnouncementId>,
) -> ApiResult<StatusCode> {
    state.service.delete_announcement(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
