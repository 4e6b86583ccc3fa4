//! Wire types shared between the Goldworks ERP backend and its clients.
//!
//! Everything here is plain serde data: monetary amounts travel as `f64`,
//! dates as RFC 3339 strings, and enums as lowercase string codes. The
//! backend owns the parsing/validation of those codes so that a bad value
//! surfaces as a domain validation error rather than a deserialization
//! failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generic error body returned with 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Acknowledgement returned by delete-style operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

/// Page-based pagination envelope used by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based page number actually served
    pub page: u32,
    /// Page size actually served (capped by the backend)
    pub per_page: u32,
    /// Total matching items across all pages
    pub total_items: u64,
    /// Total number of pages for this filter
    pub total_pages: u32,
}

/// Parse an RFC 3339 wire date, also accepting a bare `YYYY-MM-DD`
/// (interpreted as midnight UTC). Returns a human-readable error message.
pub fn parse_wire_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc));
    }
    Err(format!("Invalid date: {}", s))
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// A financial document (check) shaped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDto {
    pub id: String,
    /// Caller-supplied document number printed on the physical check
    pub document_number: String,
    /// "receivable" or "payable" - fixed at creation
    pub kind: String,
    /// Lifecycle status code ("pending", "deposited", ...)
    pub status: String,
    /// Face amount as a plain number
    pub amount: f64,
    pub bank_name: Option<String>,
    /// Customer or supplier the check belongs to
    pub party_name: Option<String>,
    /// Date the check becomes presentable (RFC 3339)
    pub due_date: Option<String>,
    pub deposited_date: Option<String>,
    pub cleared_date: Option<String>,
    pub bounced_date: Option<String>,
    pub bounced_reason: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCheckRequest {
    pub document_number: String,
    /// "receivable" or "payable"
    pub kind: String,
    pub amount: f64,
    pub bank_name: Option<String>,
    pub party_name: Option<String>,
    pub due_date: Option<String>,
    /// Optional initial status; defaults to "pending"
    pub status: Option<String>,
}

/// Partial update of descriptive fields. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCheckRequest {
    pub document_number: Option<String>,
    pub amount: Option<f64>,
    pub bank_name: Option<String>,
    pub party_name: Option<String>,
    pub due_date: Option<String>,
}

/// Body of `PATCH /api/checks/:id/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCheckStatusRequest {
    pub status: String,
    /// Required when transitioning to "bounced"
    pub reason: Option<String>,
    /// Effective date of the transition (RFC 3339); defaults to now
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckListResponse {
    pub checks: Vec<CheckDto>,
    pub pagination: PageInfo,
}

/// One row of the per-status aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckStatusSummary {
    pub status: String,
    pub count: u64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSummaryResponse {
    pub statuses: Vec<CheckStatusSummary>,
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: String,
    /// Stock-keeping code, unique per catalog
    pub sku: String,
    pub name: String,
    /// "raw_gold", "manufactured", "coin", "stone", "currency" or "general"
    pub category: String,
    pub weight_grams: Option<f64>,
    /// Gold purity (e.g. 18, 21, 24); absent for non-gold categories
    pub karat: Option<u8>,
    pub unit_price: f64,
    pub stock: i64,
    /// Soft-delete flag; inactive products are delisted, not removed
    pub active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub weight_grams: Option<f64>,
    pub karat: Option<u8>,
    pub unit_price: f64,
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub weight_grams: Option<f64>,
    pub karat: Option<u8>,
    pub unit_price: Option<f64>,
}

/// Body of `PATCH /api/products/:id/stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustStockRequest {
    /// Signed quantity change; the resulting stock may not go negative
    pub delta: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductDto>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: u64,
    pub total_stock: i64,
    /// Sum of `stock * unit_price` over active products in the category
    pub stock_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummaryResponse {
    pub categories: Vec<CategorySummary>,
}

// ---------------------------------------------------------------------------
// Employees & payroll
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: String,
    /// Badge/payroll code, unique per branch
    pub code: String,
    pub name: String,
    pub role: String,
    pub base_salary: f64,
    pub active: bool,
    pub hired_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    pub code: String,
    pub name: String,
    pub role: String,
    pub base_salary: f64,
    pub hired_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub base_salary: Option<f64>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeDto>,
    pub pagination: PageInfo,
}

/// Body of `POST /api/payroll/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    pub employee_id: String,
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub overtime_hours: Option<f64>,
    pub overtime_rate: Option<f64>,
    pub bonus: Option<f64>,
    pub deductions: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDto {
    pub id: String,
    pub employee_id: String,
    pub year: i32,
    pub month: u32,
    pub base_salary: f64,
    pub overtime_hours: f64,
    pub overtime_rate: f64,
    pub bonus: f64,
    pub deductions: f64,
    /// base + overtime_hours * overtime_rate + bonus
    pub gross: f64,
    /// gross - deductions
    pub net: f64,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollListResponse {
    pub records: Vec<PayrollDto>,
}

// ---------------------------------------------------------------------------
// Trades (sales & purchases)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDto {
    pub id: String,
    /// "sale" or "purchase"
    pub kind: String,
    pub party_name: String,
    pub total_amount: f64,
    pub gold_weight_grams: Option<f64>,
    pub note: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTradeRequest {
    pub kind: String,
    pub party_name: String,
    pub total_amount: f64,
    pub gold_weight_grams: Option<f64>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeListResponse {
    pub trades: Vec<TradeDto>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeKindSummary {
    pub kind: String,
    pub count: u64,
    pub total_amount: f64,
    pub total_gold_weight_grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSummaryResponse {
    pub kinds: Vec<TradeKindSummary>,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Cross-module aggregate served by `GET /api/dashboard/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummaryResponse {
    pub checks_by_status: Vec<CheckStatusSummary>,
    /// Amount of receivable checks still pending
    pub pending_receivable_amount: f64,
    /// Amount of payable checks still pending
    pub pending_payable_amount: f64,
    pub active_products: u64,
    pub stock_value: f64,
    pub active_employees: u64,
    pub trade_totals: Vec<TradeKindSummary>,
}
