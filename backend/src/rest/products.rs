use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{AdjustStockRequest, CreateProductRequest, UpdateProductRequest};
use tracing::info;

use super::{error_response, AppState};
use crate::domain::product_service::ProductListQuery;

/// Query parameters for the product list endpoint
#[derive(Deserialize, Debug)]
pub struct ProductListParams {
    pub category: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> impl IntoResponse {
    info!("GET /api/products - params: {:?}", params);

    let query = ProductListQuery {
        category: params.category,
        include_inactive: params.include_inactive,
        search: params.search,
        page: params.page,
        per_page: params.per_page,
    };
    match state.products.list(query).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> impl IntoResponse {
    info!("POST /api/products - sku {}", request.sku);

    match state.products.create(request).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/products/:id
pub async fn fetch(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.products.get(&id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    info!("PUT /api/products/{}", id);

    match state.products.update(&id, request).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/products/:id (soft delete)
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/products/{}", id);

    match state.products.remove(&id).await {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /api/products/:id/stock
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AdjustStockRequest>,
) -> impl IntoResponse {
    info!("PATCH /api/products/{}/stock delta {}", id, request.delta);

    match state.products.adjust_stock(&id, request).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/products/summary
pub async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    match state.products.summary().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}
