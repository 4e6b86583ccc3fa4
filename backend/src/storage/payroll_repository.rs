//! SQL repository for payroll records.
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::DbConnection;
use crate::domain::models::payroll::PayrollRecord;
use super::decode_datetime;

#[derive(Debug, Clone, Default)]
pub struct PayrollListFilter {
    pub employee_id: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Clone)]
pub struct PayrollRepository {
    connection: DbConnection,
}

impl PayrollRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn map_row(row: &SqliteRow) -> Result<PayrollRecord, sqlx::Error> {
        Ok(PayrollRecord {
            id: row.get("id"),
            employee_id: row.get("employee_id"),
            year: row.get::<i64, _>("year") as i32,
            month: row.get::<i64, _>("month") as u32,
            base_salary: row.get("base_salary"),
            overtime_hours: row.get("overtime_hours"),
            overtime_rate: row.get("overtime_rate"),
            bonus: row.get("bonus"),
            deductions: row.get("deductions"),
            gross: row.get("gross"),
            net: row.get("net"),
            generated_at: decode_datetime("generated_at", &row.get::<String, _>("generated_at"))?,
        })
    }

    pub async fn insert(&self, record: &PayrollRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO payroll_records (
                id, employee_id, year, month, base_salary, overtime_hours,
                overtime_rate, bonus, deductions, gross, net, generated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.employee_id)
        .bind(record.year as i64)
        .bind(record.month as i64)
        .bind(record.base_salary)
        .bind(record.overtime_hours)
        .bind(record.overtime_rate)
        .bind(record.bonus)
        .bind(record.deductions)
        .bind(record.gross)
        .bind(record.net)
        .bind(record.generated_at.to_rfc3339())
        .execute(self.connection.pool())
        .await?;
        Ok(())
    }

    /// One payslip per (employee, year, month).
    pub async fn period_exists(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(
            "SELECT 1 AS hit FROM payroll_records WHERE employee_id = ? AND year = ? AND month = ? LIMIT 1",
        )
        .bind(employee_id)
        .bind(year as i64)
        .bind(month as i64)
        .fetch_optional(self.connection.pool())
        .await?;
        Ok(row.is_some())
    }

    /// List records, newest period first.
    pub async fn list(&self, filter: &PayrollListFilter) -> Result<Vec<PayrollRecord>, sqlx::Error> {
        let mut where_clauses = Vec::new();
        if filter.employee_id.is_some() {
            where_clauses.push("employee_id = ?");
        }
        if filter.year.is_some() {
            where_clauses.push("year = ?");
        }
        if filter.month.is_some() {
            where_clauses.push("month = ?");
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM payroll_records{} ORDER BY year DESC, month DESC, employee_id",
            where_sql
        );
        let mut query = sqlx::query(&sql);
        if let Some(employee_id) = &filter.employee_id {
            query = query.bind(employee_id);
        }
        if let Some(year) = filter.year {
            query = query.bind(year as i64);
        }
        if let Some(month) = filter.month {
            query = query.bind(month as i64);
        }
        let rows = query.fetch_all(self.connection.pool()).await?;

        rows.iter().map(Self::map_row).collect()
    }
}
