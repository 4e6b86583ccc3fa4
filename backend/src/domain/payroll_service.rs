//! Payroll service: payslip generation and listing.
//!
//! Generation is a one-shot computation per (employee, year, month):
//! `gross = base + overtime_hours * overtime_rate + bonus`,
//! `net = gross - deductions`. The period is duplicate-checked so a slip
//! can never be issued twice.
use chrono::Utc;
use shared::{GeneratePayrollRequest, PayrollDto, PayrollListResponse};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::error::DomainError;
use crate::domain::models::payroll::PayrollRecord;
use crate::storage::employee_repository::EmployeeRepository;
use crate::storage::payroll_repository::{PayrollListFilter, PayrollRepository};

#[derive(Debug, Clone, Default)]
pub struct PayrollListQuery {
    pub employee_id: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Clone)]
pub struct PayrollService {
    repository: PayrollRepository,
    employee_repository: EmployeeRepository,
}

impl PayrollService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: PayrollRepository::new(db.clone()),
            employee_repository: EmployeeRepository::new(db),
        }
    }

    pub async fn generate(&self, request: GeneratePayrollRequest) -> Result<PayrollDto, DomainError> {
        info!(
            "Generating payroll for {} period {}-{:02}",
            request.employee_id, request.year, request.month
        );

        if !(1..=12).contains(&request.month) {
            return Err(DomainError::validation(format!(
                "Invalid month: {}",
                request.month
            )));
        }
        let overtime_hours = request.overtime_hours.unwrap_or(0.0);
        let overtime_rate = request.overtime_rate.unwrap_or(0.0);
        let bonus = request.bonus.unwrap_or(0.0);
        let deductions = request.deductions.unwrap_or(0.0);
        if overtime_hours < 0.0 || overtime_rate < 0.0 || bonus < 0.0 || deductions < 0.0 {
            return Err(DomainError::validation(
                "Payroll components may not be negative",
            ));
        }

        let employee = self
            .employee_repository
            .get(&request.employee_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee not found"))?;
        if !employee.active {
            return Err(DomainError::validation(
                "Cannot generate payroll for an inactive employee",
            ));
        }

        if self
            .repository
            .period_exists(&employee.id, request.year, request.month)
            .await?
        {
            return Err(DomainError::validation(
                "Payroll for this employee and period has already been generated",
            ));
        }

        let gross = PayrollRecord::compute_gross(
            employee.base_salary,
            overtime_hours,
            overtime_rate,
            bonus,
        );
        let record = PayrollRecord {
            id: PayrollRecord::generate_id(),
            employee_id: employee.id,
            year: request.year,
            month: request.month,
            base_salary: employee.base_salary,
            overtime_hours,
            overtime_rate,
            bonus,
            deductions,
            gross,
            net: gross - deductions,
            generated_at: Utc::now(),
        };
        self.repository.insert(&record).await?;
        Ok(to_dto(&record))
    }

    pub async fn list(&self, query: PayrollListQuery) -> Result<PayrollListResponse, DomainError> {
        let filter = PayrollListFilter {
            employee_id: query.employee_id,
            year: query.year,
            month: query.month,
        };
        let records = self.repository.list(&filter).await?;
        Ok(PayrollListResponse {
            records: records.iter().map(to_dto).collect(),
        })
    }
}

fn to_dto(record: &PayrollRecord) -> PayrollDto {
    PayrollDto {
        id: record.id.clone(),
        employee_id: record.employee_id.clone(),
        year: record.year,
        month: record.month,
        base_salary: record.base_salary,
        overtime_hours: record.overtime_hours,
        overtime_rate: record.overtime_rate,
        bonus: record.bonus,
        deductions: record.deductions,
        gross: record.gross,
        net: record.net,
        generated_at: record.generated_at.to_rfc3339(),
    }
}
