//! `/api/sales` handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::error::ApiResult;
use super::state::AppState;
use crate::domain::{AgentId, NewSale, Sale, SaleId};

/// Query string for `GET /api/sales`.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    pub limit: Option<usize>,
    pub agent_id: Option<AgentId>,
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<SalesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Sale>>> {
    let Query(query) = query?;
    let sales = state
        .service
        .list_sales(query.agent_id.as_ref(), query.limit)
        .await?;
    Ok(Json(sales))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewSale>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Sale>)> {
    let Json(input) = payload?;
    let sale = state.service.record_sale(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<SaleId>) -> ApiResult<StatusCode> {
    state.service.delete_sale(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
