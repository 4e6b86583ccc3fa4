//! SQL repository for sale/purchase records.
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::DbConnection;
use crate::domain::models::trade::{Trade, TradeKind};
use super::decode_datetime;

/// One row of the per-kind aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct KindAggregate {
    pub kind: TradeKind,
    pub count: u64,
    pub total_amount: f64,
    pub total_gold_weight_grams: f64,
}

#[derive(Clone)]
pub struct TradeRepository {
    connection: DbConnection,
}

impl TradeRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn map_row(row: &SqliteRow) -> Result<Trade, sqlx::Error> {
        let kind: String = row.get("kind");
        Ok(Trade {
            id: row.get("id"),
            kind: TradeKind::parse(&kind).map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: e.into(),
            })?,
            party_name: row.get("party_name"),
            total_amount: row.get("total_amount"),
            gold_weight_grams: row.get("gold_weight_grams"),
            note: row.get("note"),
            created_at: decode_datetime("created_at", &row.get::<String, _>("created_at"))?,
        })
    }

    pub async fn insert(&self, trade: &Trade) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO trades (id, kind, party_name, total_amount, gold_weight_grams, note, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&trade.id)
        .bind(trade.kind.as_str())
        .bind(&trade.party_name)
        .bind(trade.total_amount)
        .bind(trade.gold_weight_grams)
        .bind(&trade.note)
        .bind(trade.created_at.to_rfc3339())
        .execute(self.connection.pool())
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Trade>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM trades WHERE id = ?")
            .bind(id)
            .fetch_optional(self.connection.pool())
            .await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    /// List trades, newest first.
    pub async fn list(
        &self,
        kind: Option<TradeKind>,
        limit: u32,
        offset: i64,
    ) -> Result<(Vec<Trade>, u64), sqlx::Error> {
        let where_sql = if kind.is_some() { " WHERE kind = ?" } else { "" };

        let count_sql = format!("SELECT COUNT(*) AS total FROM trades{}", where_sql);
        let mut count_query = sqlx::query(&count_sql);
        if let Some(kind) = kind {
            count_query = count_query.bind(kind.as_str());
        }
        let total: i64 = count_query
            .fetch_one(self.connection.pool())
            .await?
            .get("total");

        let list_sql = format!(
            "SELECT * FROM trades{} ORDER BY created_at DESC, id LIMIT ? OFFSET ?",
            where_sql
        );
        let mut list_query = sqlx::query(&list_sql);
        if let Some(kind) = kind {
            list_query = list_query.bind(kind.as_str());
        }
        let rows = list_query
            .bind(limit)
            .bind(offset)
            .fetch_all(self.connection.pool())
            .await?;

        let trades = rows.iter().map(Self::map_row).collect::<Result<Vec<_>, _>>()?;
        Ok((trades, total as u64))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trades WHERE id = ?")
            .bind(id)
            .execute(self.connection.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count, amount and gold weight totals grouped by kind.
    pub async fn summary(&self) -> Result<Vec<KindAggregate>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT kind,
                   COUNT(*) AS count,
                   SUM(total_amount) AS total_amount,
                   COALESCE(SUM(gold_weight_grams), 0.0) AS total_gold_weight_grams
            FROM trades
            GROUP BY kind
            ORDER BY kind
            "#,
        )
        .fetch_all(self.connection.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let kind: String = row.get("kind");
                Ok(KindAggregate {
                    kind: TradeKind::parse(&kind).map_err(|e| sqlx::Error::ColumnDecode {
                        index: "kind".to_string(),
                        source: e.into(),
                    })?,
                    count: row.get::<i64, _>("count") as u64,
                    total_amount: row.get("total_amount"),
                    total_gold_weight_grams: row.get("total_gold_weight_grams"),
                })
            })
            .collect()
    }
}
