//! HTTP adapters: one handler module per resource plus the shared state
//! and error mapping.

pub mod checks;
pub mod dashboard;
pub mod employees;
pub mod payroll;
pub mod products;
pub mod trades;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use shared::MessageBody;
use tracing::error;

use crate::db::DbConnection;
use crate::domain::{
    CheckService, DashboardService, DomainError, EmployeeService, PayrollService, ProductService,
    TradeService,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub checks: CheckService,
    pub products: ProductService,
    pub employees: EmployeeService,
    pub payroll: PayrollService,
    pub trades: TradeService,
    pub dashboard: DashboardService,
}

impl AppState {
    /// Wire every service onto the shared connection.
    pub fn new(db: DbConnection) -> Self {
        Self {
            checks: CheckService::new(db.clone()),
            products: ProductService::new(db.clone()),
            employees: EmployeeService::new(db.clone()),
            payroll: PayrollService::new(db.clone()),
            trades: TradeService::new(db.clone()),
            dashboard: DashboardService::new(db),
        }
    }
}

/// Map a domain failure onto its HTTP shape.
///
/// NotFound -> 404, Validation -> 400, Database -> 500. Business-rule
/// messages go to the caller verbatim; storage faults are logged and
/// masked.
pub(crate) fn error_response(err: DomainError) -> Response {
    match err {
        DomainError::NotFound(message) => {
            (StatusCode::NOT_FOUND, Json(MessageBody::new(message))).into_response()
        }
        DomainError::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(MessageBody::new(message))).into_response()
        }
        DomainError::Database(e) => {
            error!("Database error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody::new("Internal server error")),
            )
                .into_response()
        }
    }
}

/// Build the `/api` router over the given state.
pub fn api_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/checks", get(checks::list).post(checks::create))
        .route("/checks/summary", get(checks::summary))
        .route(
            "/checks/:id",
            get(checks::fetch).put(checks::update).delete(checks::remove),
        )
        .route("/checks/:id/status", patch(checks::update_status))
        .route("/products", get(products::list).post(products::create))
        .route("/products/summary", get(products::summary))
        .route(
            "/products/:id",
            get(products::fetch)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/products/:id/stock", patch(products::adjust_stock))
        .route("/employees", get(employees::list).post(employees::create))
        .route(
            "/employees/:id",
            get(employees::fetch).put(employees::update),
        )
        .route("/payroll", get(payroll::list))
        .route("/payroll/generate", post(payroll::generate))
        .route("/trades", get(trades::list).post(trades::create))
        .route("/trades/summary", get(trades::summary))
        .route("/trades/:id", get(trades::fetch).delete(trades::remove))
        .route("/dashboard/summary", get(dashboard::summary));

    Router::new().nest("/api", api_routes).with_state(state)
}
