//! Domain model for an employee.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    /// Badge/payroll code, duplicate-checked at creation
    pub code: String,
    pub name: String,
    pub role: String,
    pub base_salary: f64,
    pub active: bool,
    pub hired_at: DateTime<Utc>,
}

impl Employee {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
