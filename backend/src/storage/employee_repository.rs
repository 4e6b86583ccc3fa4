//! SQL repository for employees.
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::DbConnection;
use crate::domain::models::employee::Employee;
use super::decode_datetime;

#[derive(Clone)]
pub struct EmployeeRepository {
    connection: DbConnection,
}

impl EmployeeRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn map_row(row: &SqliteRow) -> Result<Employee, sqlx::Error> {
        Ok(Employee {
            id: row.get("id"),
            code: row.get("code"),
            name: row.get("name"),
            role: row.get("role"),
            base_salary: row.get("base_salary"),
            active: row.get::<i64, _>("active") != 0,
            hired_at: decode_datetime("hired_at", &row.get::<String, _>("hired_at"))?,
        })
    }

    pub async fn insert(&self, employee: &Employee) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, code, name, role, base_salary, active, hired_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.code)
        .bind(&employee.name)
        .bind(&employee.role)
        .bind(employee.base_salary)
        .bind(employee.active as i64)
        .bind(employee.hired_at.to_rfc3339())
        .execute(self.connection.pool())
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Employee>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(self.connection.pool())
            .await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn code_exists(&self, code: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 AS hit FROM employees WHERE code = ? LIMIT 1")
            .bind(code)
            .fetch_optional(self.connection.pool())
            .await?;
        Ok(row.is_some())
    }

    /// List employees ordered by name.
    pub async fn list(
        &self,
        active_only: bool,
        limit: u32,
        offset: i64,
    ) -> Result<(Vec<Employee>, u64), sqlx::Error> {
        let where_sql = if active_only { " WHERE active = 1" } else { "" };

        let count_sql = format!("SELECT COUNT(*) AS total FROM employees{}", where_sql);
        let total: i64 = sqlx::query(&count_sql)
            .fetch_one(self.connection.pool())
            .await?
            .get("total");

        let list_sql = format!(
            "SELECT * FROM employees{} ORDER BY name, id LIMIT ? OFFSET ?",
            where_sql
        );
        let rows = sqlx::query(&list_sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.connection.pool())
            .await?;

        let employees = rows.iter().map(Self::map_row).collect::<Result<Vec<_>, _>>()?;
        Ok((employees, total as u64))
    }

    pub async fn update_fields(&self, employee: &Employee) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET name = ?, role = ?, base_salary = ?, active = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.role)
        .bind(employee.base_salary)
        .bind(employee.active as i64)
        .bind(&employee.id)
        .execute(self.connection.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn active_count(&self) -> Result<u64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM employees WHERE active = 1")
            .fetch_one(self.connection.pool())
            .await?;
        Ok(row.get::<i64, _>("total") as u64)
    }
}
