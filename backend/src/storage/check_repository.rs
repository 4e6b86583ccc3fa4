//! SQL repository for checks.
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use crate::db::DbConnection;
use crate::domain::check_lifecycle::TransitionPlan;
use crate::domain::models::check::{Check, CheckKind, CheckStatus};
use super::{decode_datetime, decode_datetime_opt};

/// Filters accepted by [`CheckRepository::list`].
#[derive(Debug, Clone, Default)]
pub struct CheckListFilter {
    pub status: Option<CheckStatus>,
    pub kind: Option<CheckKind>,
    /// Matches document number or party name, case-insensitive substring
    pub search: Option<String>,
}

/// One row of the per-status aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusAggregate {
    pub status: CheckStatus,
    pub count: u64,
    pub total_amount: f64,
}

#[derive(Clone)]
pub struct CheckRepository {
    connection: DbConnection,
}

impl CheckRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn map_row(row: &SqliteRow) -> Result<Check, sqlx::Error> {
        let kind: String = row.get("kind");
        let status: String = row.get("status");
        Ok(Check {
            id: row.get("id"),
            document_number: row.get("document_number"),
            kind: CheckKind::parse(&kind).map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: e.into(),
            })?,
            status: CheckStatus::parse(&status).map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: e.into(),
            })?,
            amount: row.get("amount"),
            bank_name: row.get("bank_name"),
            party_name: row.get("party_name"),
            due_date: decode_datetime_opt("due_date", row.get("due_date"))?,
            deposited_date: decode_datetime_opt("deposited_date", row.get("deposited_date"))?,
            cleared_date: decode_datetime_opt("cleared_date", row.get("cleared_date"))?,
            bounced_date: decode_datetime_opt("bounced_date", row.get("bounced_date"))?,
            bounced_reason: row.get("bounced_reason"),
            created_at: decode_datetime("created_at", &row.get::<String, _>("created_at"))?,
        })
    }

    pub async fn insert(&self, check: &Check) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO checks (
                id, document_number, kind, status, amount, bank_name, party_name,
                due_date, deposited_date, cleared_date, bounced_date, bounced_reason, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&check.id)
        .bind(&check.document_number)
        .bind(check.kind.as_str())
        .bind(check.status.as_str())
        .bind(check.amount)
        .bind(&check.bank_name)
        .bind(&check.party_name)
        .bind(check.due_date.map(|d| d.to_rfc3339()))
        .bind(check.deposited_date.map(|d| d.to_rfc3339()))
        .bind(check.cleared_date.map(|d| d.to_rfc3339()))
        .bind(check.bounced_date.map(|d| d.to_rfc3339()))
        .bind(&check.bounced_reason)
        .bind(check.created_at.to_rfc3339())
        .execute(self.connection.pool())
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Check>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM checks WHERE id = ?")
            .bind(id)
            .fetch_optional(self.connection.pool())
            .await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn document_number_exists(&self, document_number: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 AS hit FROM checks WHERE document_number = ? LIMIT 1")
            .bind(document_number)
            .fetch_optional(self.connection.pool())
            .await?;
        Ok(row.is_some())
    }

    /// List checks, newest first, with a total count for the pagination
    /// envelope.
    pub async fn list(
        &self,
        filter: &CheckListFilter,
        limit: u32,
        offset: i64,
    ) -> Result<(Vec<Check>, u64), sqlx::Error> {
        let mut where_clauses = Vec::new();
        if filter.status.is_some() {
            where_clauses.push("status = ?");
        }
        if filter.kind.is_some() {
            where_clauses.push("kind = ?");
        }
        if filter.search.is_some() {
            where_clauses.push("(document_number LIKE ? OR party_name LIKE ?)");
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_clauses.join(" AND "))
        };

        let search_pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let count_sql = format!("SELECT COUNT(*) AS total FROM checks{}", where_sql);
        let mut count_query = sqlx::query(&count_sql);
        if let Some(status) = filter.status {
            count_query = count_query.bind(status.as_str());
        }
        if let Some(kind) = filter.kind {
            count_query = count_query.bind(kind.as_str());
        }
        if let Some(pattern) = &search_pattern {
            count_query = count_query.bind(pattern).bind(pattern);
        }
        let total: i64 = count_query
            .fetch_one(self.connection.pool())
            .await?
            .get("total");

        let list_sql = format!(
            "SELECT * FROM checks{} ORDER BY created_at DESC, id LIMIT ? OFFSET ?",
            where_sql
        );
        let mut list_query = sqlx::query(&list_sql);
        if let Some(status) = filter.status {
            list_query = list_query.bind(status.as_str());
        }
        if let Some(kind) = filter.kind {
            list_query = list_query.bind(kind.as_str());
        }
        if let Some(pattern) = &search_pattern {
            list_query = list_query.bind(pattern).bind(pattern);
        }
        let rows = list_query
            .bind(limit)
            .bind(offset)
            .fetch_all(self.connection.pool())
            .await?;

        let checks = rows.iter().map(Self::map_row).collect::<Result<Vec<_>, _>>()?;
        Ok((checks, total as u64))
    }

    /// Persist an accepted transition plan in one UPDATE statement.
    ///
    /// Lifecycle timestamps go through COALESCE so an already-stamped field
    /// is never overwritten, even if a concurrent transition landed between
    /// our read and this write. Returns false when the row no longer exists.
    pub async fn apply_transition(
        &self,
        id: &str,
        plan: &TransitionPlan,
    ) -> Result<bool, sqlx::Error> {
        debug!("Applying transition to {}: -> {}", id, plan.status.as_str());
        let result = sqlx::query(
            r#"
            UPDATE checks SET
                status = ?,
                deposited_date = COALESCE(deposited_date, ?),
                cleared_date = COALESCE(cleared_date, ?),
                bounced_date = COALESCE(bounced_date, ?),
                bounced_reason = COALESCE(bounced_reason, ?)
            WHERE id = ?
            "#,
        )
        .bind(plan.status.as_str())
        .bind(plan.deposited_date.map(|d| d.to_rfc3339()))
        .bind(plan.cleared_date.map(|d| d.to_rfc3339()))
        .bind(plan.bounced_date.map(|d| d.to_rfc3339()))
        .bind(&plan.bounced_reason)
        .bind(id)
        .execute(self.connection.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Persist the descriptive fields of an already-merged document.
    pub async fn update_fields(&self, check: &Check) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE checks SET
                document_number = ?,
                amount = ?,
                bank_name = ?,
                party_name = ?,
                due_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&check.document_number)
        .bind(check.amount)
        .bind(&check.bank_name)
        .bind(&check.party_name)
        .bind(check.due_date.map(|d| d.to_rfc3339()))
        .bind(&check.id)
        .execute(self.connection.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM checks WHERE id = ?")
            .bind(id)
            .execute(self.connection.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count and amount totals grouped by status.
    pub async fn summary(&self) -> Result<Vec<StatusAggregate>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT status, COUNT(*) AS count, SUM(amount) AS total_amount
            FROM checks
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(self.connection.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let status: String = row.get("status");
                Ok(StatusAggregate {
                    status: CheckStatus::parse(&status).map_err(|e| {
                        sqlx::Error::ColumnDecode {
                            index: "status".to_string(),
                            source: e.into(),
                        }
                    })?,
                    count: row.get::<i64, _>("count") as u64,
                    total_amount: row.get::<f64, _>("total_amount"),
                })
            })
            .collect()
    }

    /// Total pending amount for one side of the book.
    pub async fn pending_amount(&self, kind: CheckKind) -> Result<f64, sqlx::Error> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(amount), 0.0) AS total FROM checks WHERE status = 'pending' AND kind = ?",
        )
        .bind(kind.as_str())
        .fetch_one(self.connection.pool())
        .await?;
        Ok(row.get("total"))
    }
}
