use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{CreateCheckRequest, UpdateCheckRequest, UpdateCheckStatusRequest};
use tracing::info;

use super::{error_response, AppState};
use crate::domain::check_service::CheckListQuery;

/// Query parameters for the check list endpoint
#[derive(Deserialize, Debug)]
pub struct CheckListParams {
    pub status: Option<String>,
    pub kind: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /api/checks
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CheckListParams>,
) -> impl IntoResponse {
    info!("GET /api/checks - params: {:?}", params);

    let query = CheckListQuery {
        status: params.status,
        kind: params.kind,
        search: params.search,
        page: params.page,
        per_page: params.per_page,
    };
    match state.checks.list(query).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/checks
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckRequest>,
) -> impl IntoResponse {
    info!("POST /api/checks - document {}", request.document_number);

    match state.checks.create(request).await {
        Ok(check) => (StatusCode::CREATED, Json(check)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/checks/:id
pub async fn fetch(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.checks.get(&id).await {
        Ok(check) => (StatusCode::OK, Json(check)).into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/checks/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCheckRequest>,
) -> impl IntoResponse {
    info!("PUT /api/checks/{}", id);

    match state.checks.update(&id, request).await {
        Ok(check) => (StatusCode::OK, Json(check)).into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /api/checks/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCheckStatusRequest>,
) -> impl IntoResponse {
    info!("PATCH /api/checks/{}/status -> {}", id, request.status);

    match state.checks.update_status(&id, request).await {
        Ok(check) => (StatusCode::OK, Json(check)).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/checks/:id
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/checks/{}", id);

    match state.checks.remove(&id).await {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/checks/summary
pub async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    match state.checks.summary().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use axum::response::Response;
    use shared::CheckDto;

    async fn setup_test_state() -> AppState {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AppState::new(db)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        serde_json::from_slice(&bytes).expect("Failed to parse body")
    }

    fn create_request(document_number: &str) -> CreateCheckRequest {
        CreateCheckRequest {
            document_number: document_number.to_string(),
            kind: "receivable".to_string(),
            amount: 5_000_000.0,
            bank_name: None,
            party_name: None,
            due_date: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_handler_returns_created() {
        let state = setup_test_state().await;

        let response = create(State(state), Json(create_request("CHK-1")))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let check: CheckDto = body_json(response).await;
        assert_eq!(check.status, "pending");
    }

    #[tokio::test]
    async fn test_update_status_handler_maps_validation_to_400() {
        let state = setup_test_state().await;
        let created = create(State(state.clone()), Json(create_request("CHK-1")))
            .await
            .into_response();
        let check: CheckDto = body_json(created).await;

        let response = update_status(
            State(state),
            Path(check.id),
            Json(UpdateCheckStatusRequest {
                status: "bounced".to_string(),
                reason: None,
                date: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: shared::MessageBody = body_json(response).await;
        assert_eq!(body.message, "Reason is required for bounced checks");
    }

    #[tokio::test]
    async fn test_fetch_handler_maps_missing_to_404() {
        let state = setup_test_state().await;

        let response = fetch(State(state), Path("missing".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: shared::MessageBody = body_json(response).await;
        assert_eq!(body.message, "Check not found");
    }

    #[tokio::test]
    async fn test_remove_handler_blocks_processed_check() {
        let state = setup_test_state().await;
        let created = create(State(state.clone()), Json(create_request("CHK-1")))
            .await
            .into_response();
        let check: CheckDto = body_json(created).await;

        update_status(
            State(state.clone()),
            Path(check.id.clone()),
            Json(UpdateCheckStatusRequest {
                status: "cleared".to_string(),
                reason: None,
                date: None,
            }),
        )
        .await
        .into_response();

        let response = remove(State(state), Path(check.id)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: shared::MessageBody = body_json(response).await;
        assert_eq!(
            body.message,
            "Cannot delete a check that has been processed. Cancel it instead."
        );
    }
}
