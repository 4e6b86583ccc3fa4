use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{CreateEmployeeRequest, UpdateEmployeeRequest};
use tracing::info;

use super::{error_response, AppState};
use crate::domain::employee_service::EmployeeListQuery;

/// Query parameters for the employee list endpoint
#[derive(Deserialize, Debug)]
pub struct EmployeeListParams {
    #[serde(default)]
    pub active_only: bool,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /api/employees
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<EmployeeListParams>,
) -> impl IntoResponse {
    info!("GET /api/employees - params: {:?}", params);

    let query = EmployeeListQuery {
        active_only: params.active_only,
        page: params.page,
        per_page: params.per_page,
    };
    match state.employees.list(query).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/employees
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> impl IntoResponse {
    info!("POST /api/employees - code {}", request.code);

    match state.employees.create(request).await {
        Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/employees/:id
pub async fn fetch(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.employees.get(&id).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/employees/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> impl IntoResponse {
    info!("PUT /api/employees/{}", id);

    match state.employees.update(&id, request).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(e) => error_response(e),
    }
}
