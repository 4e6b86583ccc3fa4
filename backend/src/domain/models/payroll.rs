//! Domain model for a generated payroll record.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One generated payslip for an (employee, year, month) period.
/// `gross` and `net` are computed once at generation and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: String,
    pub employee_id: String,
    pub year: i32,
    pub month: u32,
    pub base_salary: f64,
    pub overtime_hours: f64,
    pub overtime_rate: f64,
    pub bonus: f64,
    pub deductions: f64,
    pub gross: f64,
    pub net: f64,
    pub generated_at: DateTime<Utc>,
}

impl PayrollRecord {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// gross = base + overtime_hours * overtime_rate + bonus
    pub fn compute_gross(base_salary: f64, overtime_hours: f64, overtime_rate: f64, bonus: f64) -> f64 {
        base_salary + overtime_hours * overtime_rate + bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gross_includes_overtime_and_bonus() {
        let gross = PayrollRecord::compute_gross(1000.0, 10.0, 12.5, 50.0);
        assert_eq!(gross, 1175.0);
    }
}
