//! SQL storage layer: one repository per entity over the shared
//! `DbConnection`. Repositories own row mapping and the queries; all
//! business rules live in the domain services above them.

pub mod check_repository;
pub mod employee_repository;
pub mod payroll_repository;
pub mod product_repository;
pub mod trade_repository;

pub use check_repository::CheckRepository;
pub use employee_repository::EmployeeRepository;
pub use payroll_repository::PayrollRepository;
pub use product_repository::ProductRepository;
pub use trade_repository::TradeRepository;

use chrono::{DateTime, Utc};

/// Decode an RFC 3339 TEXT column into a UTC timestamp.
pub(crate) fn decode_datetime(column: &str, raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

/// Decode an optional RFC 3339 TEXT column.
pub(crate) fn decode_datetime_opt(
    column: &str,
    raw: Option<String>,
) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    raw.map(|s| decode_datetime(column, &s)).transpose()
}
