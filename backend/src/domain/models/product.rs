//! Domain model for a catalog product.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    RawGold,
    Manufactured,
    Coin,
    Stone,
    Currency,
    General,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 6] = [
        ProductCategory::RawGold,
        ProductCategory::Manufactured,
        ProductCategory::Coin,
        ProductCategory::Stone,
        ProductCategory::Currency,
        ProductCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::RawGold => "raw_gold",
            ProductCategory::Manufactured => "manufactured",
            ProductCategory::Coin => "coin",
            ProductCategory::Stone => "stone",
            ProductCategory::Currency => "currency",
            ProductCategory::General => "general",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "raw_gold" => Ok(ProductCategory::RawGold),
            "manufactured" => Ok(ProductCategory::Manufactured),
            "coin" => Ok(ProductCategory::Coin),
            "stone" => Ok(ProductCategory::Stone),
            "currency" => Ok(ProductCategory::Currency),
            "general" => Ok(ProductCategory::General),
            _ => Err(format!("Invalid product category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub category: ProductCategory,
    pub weight_grams: Option<f64>,
    pub karat: Option<u8>,
    pub unit_price: f64,
    pub stock: i64,
    /// Soft-delete flag: delisted products stay on record
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
