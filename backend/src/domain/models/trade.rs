//! Domain model for a sale or purchase record.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeKind {
    Sale,
    Purchase,
}

impl TradeKind {
    pub const ALL: [TradeKind; 2] = [TradeKind::Sale, TradeKind::Purchase];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeKind::Sale => "sale",
            TradeKind::Purchase => "purchase",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "sale" => Ok(TradeKind::Sale),
            "purchase" => Ok(TradeKind::Purchase),
            _ => Err(format!("Invalid trade kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub kind: TradeKind,
    pub party_name: String,
    pub total_amount: f64,
    pub gold_weight_grams: Option<f64>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Trade {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
