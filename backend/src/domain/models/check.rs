//! Domain model for a check - the financial document tracked through a
//! status lifecycle.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the check is money owed to us or by us. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckKind {
    Receivable,
    Payable,
}

impl CheckKind {
    /// Storage/wire code for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Receivable => "receivable",
            CheckKind::Payable => "payable",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "receivable" => Ok(CheckKind::Receivable),
            "payable" => Ok(CheckKind::Payable),
            _ => Err(format!("Invalid check kind: {}", s)),
        }
    }
}

/// Lifecycle status of a check. The sole mutable field the lifecycle
/// governs; every other mutation goes through the descriptive-field update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatus {
    Pending,
    Deposited,
    Cleared,
    Bounced,
    Cancelled,
    Cashed,
    Transferred,
}

impl CheckStatus {
    pub const ALL: [CheckStatus; 7] = [
        CheckStatus::Pending,
        CheckStatus::Deposited,
        CheckStatus::Cleared,
        CheckStatus::Bounced,
        CheckStatus::Cancelled,
        CheckStatus::Cashed,
        CheckStatus::Transferred,
    ];

    /// Storage/wire code for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pending => "pending",
            CheckStatus::Deposited => "deposited",
            CheckStatus::Cleared => "cleared",
            CheckStatus::Bounced => "bounced",
            CheckStatus::Cancelled => "cancelled",
            CheckStatus::Cashed => "cashed",
            CheckStatus::Transferred => "transferred",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(CheckStatus::Pending),
            "deposited" => Ok(CheckStatus::Deposited),
            "cleared" => Ok(CheckStatus::Cleared),
            "bounced" => Ok(CheckStatus::Bounced),
            "cancelled" => Ok(CheckStatus::Cancelled),
            "cashed" => Ok(CheckStatus::Cashed),
            "transferred" => Ok(CheckStatus::Transferred),
            _ => Err(format!("Invalid check status: {}", s)),
        }
    }

    /// A settled check may no longer have its descriptive fields edited.
    pub fn is_settled(&self) -> bool {
        matches!(self, CheckStatus::Cleared | CheckStatus::Cashed)
    }

    /// A processed check may not be deleted, only cancelled.
    pub fn blocks_deletion(&self) -> bool {
        matches!(
            self,
            CheckStatus::Cleared | CheckStatus::Cashed | CheckStatus::Deposited
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub id: String,
    pub document_number: String,
    pub kind: CheckKind,
    pub status: CheckStatus,
    pub amount: f64,
    pub bank_name: Option<String>,
    pub party_name: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    /// Stamped the first time the check reaches Deposited (or backfilled
    /// when it clears without a prior deposit)
    pub deposited_date: Option<DateTime<Utc>>,
    pub cleared_date: Option<DateTime<Utc>>,
    pub bounced_date: Option<DateTime<Utc>>,
    pub bounced_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Check {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_roundtrip() {
        for status in CheckStatus::ALL {
            assert_eq!(CheckStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(CheckStatus::parse("CLEARED").unwrap(), CheckStatus::Cleared);
        assert_eq!(CheckKind::parse("Payable").unwrap(), CheckKind::Payable);
    }

    #[test]
    fn status_parse_rejects_unknown() {
        assert!(CheckStatus::parse("shredded").is_err());
        assert!(CheckKind::parse("iou").is_err());
    }

    #[test]
    fn settled_and_deletion_guards() {
        assert!(CheckStatus::Cleared.is_settled());
        assert!(CheckStatus::Cashed.is_settled());
        assert!(!CheckStatus::Deposited.is_settled());

        assert!(CheckStatus::Deposited.blocks_deletion());
        assert!(!CheckStatus::Pending.blocks_deletion());
        assert!(!CheckStatus::Cancelled.blocks_deletion());
        assert!(!CheckStatus::Bounced.blocks_deletion());
    }
}
