//! `/api/cash-offers` handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::error::ApiResult;
use super::state::AppState;
use crate::domain::{CashOffer, CashOfferId, CashOfferUpdate, NewCashOffer};

#[derive(Debug, Default, Deserialize)]
pub struct CashOffersQuery {
    /// Only offers still running.
    #[serde(default)]
    pub active: bool,
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CashOffersQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<CashOffer>>> {
    let Query(query) = query?;
    Ok(Json(state.service.list_cash_offers(query.active).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<CashOfferId>,
) -> ApiResult<Json<CashOffer>> {
    Ok(Json(state.service.get_cash_offer(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewCashOffer>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CashOffer>)> {
    let Json(input) = payload?;
    let offer = state.service.create_cash_offer(input).await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CashOfferId>,
    payload: Result<Json<CashOfferUpdate>, JsonRejection>,
) -> ApiResult<Json<CashOffer>> {
    let Json(update) = payload?;
    Ok(Json(state.service.update_cash_offer(&id, update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CashOfferId>,
) -> ApiResult<StatusCode> {
    state.service.delete_cash_offer(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
