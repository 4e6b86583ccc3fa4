//! SQL repository for catalog products.
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::DbConnection;
use crate::domain::models::product::{Product, ProductCategory};
use super::decode_datetime;

#[derive(Debug, Clone, Default)]
pub struct ProductListFilter {
    pub category: Option<ProductCategory>,
    /// When true (the default listing), soft-deleted products are excluded
    pub active_only: bool,
    /// Matches sku or name, case-insensitive substring
    pub search: Option<String>,
}

/// One row of the per-category aggregate over active products.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAggregate {
    pub category: ProductCategory,
    pub count: u64,
    pub total_stock: i64,
    pub stock_value: f64,
}

#[derive(Clone)]
pub struct ProductRepository {
    connection: DbConnection,
}

impl ProductRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn map_row(row: &SqliteRow) -> Result<Product, sqlx::Error> {
        let category: String = row.get("category");
        Ok(Product {
            id: row.get("id"),
            sku: row.get("sku"),
            name: row.get("name"),
            category: ProductCategory::parse(&category).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "category".to_string(),
                    source: e.into(),
                }
            })?,
            weight_grams: row.get("weight_grams"),
            karat: row.get::<Option<i64>, _>("karat").map(|k| k as u8),
            unit_price: row.get("unit_price"),
            stock: row.get("stock"),
            active: row.get::<i64, _>("active") != 0,
            created_at: decode_datetime("created_at", &row.get::<String, _>("created_at"))?,
        })
    }

    pub async fn insert(&self, product: &Product) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, name, category, weight_grams, karat, unit_price, stock, active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.category.as_str())
        .bind(product.weight_grams)
        .bind(product.karat.map(|k| k as i64))
        .bind(product.unit_price)
        .bind(product.stock)
        .bind(product.active as i64)
        .bind(product.created_at.to_rfc3339())
        .execute(self.connection.pool())
        .await?;
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Product>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(self.connection.pool())
            .await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn sku_exists(&self, sku: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 AS hit FROM products WHERE sku = ? LIMIT 1")
            .bind(sku)
            .fetch_optional(self.connection.pool())
            .await?;
        Ok(row.is_some())
    }

    pub async fn list(
        &self,
        filter: &ProductListFilter,
        limit: u32,
        offset: i64,
    ) -> Result<(Vec<Product>, u64), sqlx::Error> {
        let mut where_clauses = Vec::new();
        if filter.category.is_some() {
            where_clauses.push("category = ?");
        }
        if filter.active_only {
            where_clauses.push("active = 1");
        }
        if filter.search.is_some() {
            where_clauses.push("(sku LIKE ? OR name LIKE ?)");
        }
        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_clauses.join(" AND "))
        };

        let search_pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let count_sql = format!("SELECT COUNT(*) AS total FROM products{}", where_sql);
        let mut count_query = sqlx::query(&count_sql);
        if let Some(category) = filter.category {
            count_query = count_query.bind(category.as_str());
        }
        if let Some(pattern) = &search_pattern {
            count_query = count_query.bind(pattern).bind(pattern);
        }
        let total: i64 = count_query
            .fetch_one(self.connection.pool())
            .await?
            .get("total");

        let list_sql = format!(
            "SELECT * FROM products{} ORDER BY name, id LIMIT ? OFFSET ?",
            where_sql
        );
        let mut list_query = sqlx::query(&list_sql);
        if let Some(category) = filter.category {
            list_query = list_query.bind(category.as_str());
        }
        if let Some(pattern) = &search_pattern {
            list_query = list_query.bind(pattern).bind(pattern);
        }
        let rows = list_query
            .bind(limit)
            .bind(offset)
            .fetch_all(self.connection.pool())
            .await?;

        let products = rows.iter().map(Self::map_row).collect::<Result<Vec<_>, _>>()?;
        Ok((products, total as u64))
    }

    /// Persist the mutable fields of an already-merged product.
    pub async fn update_fields(&self, product: &Product) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?,
                category = ?,
                weight_grams = ?,
                karat = ?,
                unit_price = ?,
                stock = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(product.category.as_str())
        .bind(product.weight_grams)
        .bind(product.karat.map(|k| k as i64))
        .bind(product.unit_price)
        .bind(product.stock)
        .bind(&product.id)
        .execute(self.connection.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft delete / restore.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE products SET active = ? WHERE id = ?")
            .bind(active as i64)
            .bind(id)
            .execute(self.connection.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Adjust stock by a signed delta in one statement, refusing to go
    /// negative. Returns the updated row, or None when the guard (or the
    /// id) did not match.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> Result<Option<Product>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET stock = stock + ? WHERE id = ? AND stock + ? >= 0",
        )
        .bind(delta)
        .bind(id)
        .bind(delta)
        .execute(self.connection.pool())
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Per-category counts and stock value over active products.
    pub async fn category_summary(&self) -> Result<Vec<CategoryAggregate>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT category,
                   COUNT(*) AS count,
                   SUM(stock) AS total_stock,
                   SUM(stock * unit_price) AS stock_value
            FROM products
            WHERE active = 1
            GROUP BY category
            ORDER BY category
            "#,
        )
        .fetch_all(self.connection.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let category: String = row.get("category");
                Ok(CategoryAggregate {
                    category: ProductCategory::parse(&category).map_err(|e| {
                        sqlx::Error::ColumnDecode {
                            index: "category".to_string(),
                            source: e.into(),
                        }
                    })?,
                    count: row.get::<i64, _>("count") as u64,
                    total_stock: row.get("total_stock"),
                    stock_value: row.get("stock_value"),
                })
            })
            .collect()
    }
}
