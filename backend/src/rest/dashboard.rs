use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use super::{error_response, AppState};

/// GET /api/dashboard/summary
pub async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard/summary");

    match state.dashboard.summary().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}
