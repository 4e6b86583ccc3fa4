use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::GeneratePayrollRequest;
use tracing::info;

use super::{error_response, AppState};
use crate::domain::payroll_service::PayrollListQuery;

/// Query parameters for the payroll list endpoint
#[derive(Deserialize, Debug)]
pub struct PayrollListParams {
    pub employee_id: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// GET /api/payroll
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PayrollListParams>,
) -> impl IntoResponse {
    info!("GET /api/payroll - params: {:?}", params);

    let query = PayrollListQuery {
        employee_id: params.employee_id,
        year: params.year,
        month: params.month,
    };
    match state.payroll.list(query).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/payroll/generate
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GeneratePayrollRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/payroll/generate - employee {} period {}-{:02}",
        request.employee_id, request.year, request.month
    );

    match state.payroll.generate(request).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(e),
    }
}
