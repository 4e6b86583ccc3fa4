//! Domain layer: services, models and the check lifecycle rules.

pub mod check_lifecycle;
pub mod check_service;
pub mod dashboard_service;
pub mod employee_service;
pub mod error;
pub mod models;
pub mod payroll_service;
pub mod product_service;
pub mod trade_service;

pub use check_service::CheckService;
pub use dashboard_service::DashboardService;
pub use employee_service::EmployeeService;
pub use error::DomainError;
pub use payroll_service::PayrollService;
pub use product_service::ProductService;
pub use trade_service::TradeService;
