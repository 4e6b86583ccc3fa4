use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::CreateTradeRequest;
use tracing::info;

use super::{error_response, AppState};
use crate::domain::trade_service::TradeListQuery;

/// Query parameters for the trade list endpoint
#[derive(Deserialize, Debug)]
pub struct TradeListParams {
    pub kind: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /api/trades
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TradeListParams>,
) -> impl IntoResponse {
    info!("GET /api/trades - params: {:?}", params);

    let query = TradeListQuery {
        kind: params.kind,
        page: params.page,
        per_page: params.per_page,
    };
    match state.trades.list(query).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/trades
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateTradeRequest>,
) -> impl IntoResponse {
    info!("POST /api/trades - {} for {}", request.kind, request.party_name);

    match state.trades.create(request).await {
        Ok(trade) => (StatusCode::CREATED, Json(trade)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/trades/:id
pub async fn fetch(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.trades.get(&id).await {
        Ok(trade) => (StatusCode::OK, Json(trade)).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/trades/:id
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/trades/{}", id);

    match state.trades.remove(&id).await {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/trades/summary
pub async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    match state.trades.summary().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}
