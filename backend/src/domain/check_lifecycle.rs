//! Pure transition rules for the check status lifecycle.
//!
//! Given the current document and a requested status this module computes
//! the field-update set to persist, or rejects the request. It performs no
//! I/O, so every rule is testable in isolation; `CheckService` is the only
//! caller and persists the resulting plan in a single write.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::models::check::{Check, CheckStatus};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    #[error("Reason is required for bounced checks")]
    MissingBounceReason,
}

/// Field-update set produced by an accepted transition.
///
/// Each `Some(..)` timestamp means "stamp with this value"; they are only
/// ever emitted for fields the current document has unset, so a lifecycle
/// timestamp is written exactly once, the first time its status is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub status: CheckStatus,
    pub deposited_date: Option<DateTime<Utc>>,
    pub cleared_date: Option<DateTime<Utc>>,
    pub bounced_date: Option<DateTime<Utc>>,
    pub bounced_reason: Option<String>,
}

impl TransitionPlan {
    fn status_only(status: CheckStatus) -> Self {
        Self {
            status,
            deposited_date: None,
            cleared_date: None,
            bounced_date: None,
            bounced_reason: None,
        }
    }

    /// Merge this plan into a document snapshot, yielding the updated
    /// document as it will exist after persistence.
    pub fn apply(&self, check: &Check) -> Check {
        let mut updated = check.clone();
        updated.status = self.status;
        if let Some(date) = self.deposited_date {
            updated.deposited_date = Some(date);
        }
        if let Some(date) = self.cleared_date {
            updated.cleared_date = Some(date);
        }
        if let Some(date) = self.bounced_date {
            updated.bounced_date = Some(date);
        }
        if let Some(reason) = &self.bounced_reason {
            updated.bounced_reason = Some(reason.clone());
        }
        updated
    }
}

/// Decide whether `requested` is an acceptable next status for `check` and
/// compute the side-effect fields.
///
/// Per-target-status policy:
/// - `Deposited`: stamp `deposited_date` if never set.
/// - `Cleared`: stamp `cleared_date` if never set, and backfill
///   `deposited_date` to the same effective date when the check clears
///   without a prior deposit.
/// - `Bounced`: requires a non-empty `reason`; stamps `bounced_date` and
///   `bounced_reason` if never set.
/// - `Cancelled`, `Cashed`, `Transferred`, `Pending`: status-only update.
///
/// No transition is rejected based on the current status; the lifecycle is
/// one-directional in practice but any-to-any by rule.
pub fn plan_transition(
    check: &Check,
    requested: CheckStatus,
    reason: Option<&str>,
    effective: DateTime<Utc>,
) -> Result<TransitionPlan, LifecycleError> {
    let mut plan = TransitionPlan::status_only(requested);

    match requested {
        CheckStatus::Deposited => {
            if check.deposited_date.is_none() {
                plan.deposited_date = Some(effective);
            }
        }
        CheckStatus::Cleared => {
            if check.cleared_date.is_none() {
                plan.cleared_date = Some(effective);
            }
            // Clearing without a prior deposit counts as depositing on the
            // same date.
            if check.deposited_date.is_none() {
                plan.deposited_date = Some(effective);
            }
        }
        CheckStatus::Bounced => {
            let reason = reason.map(str::trim).filter(|r| !r.is_empty());
            let reason = reason.ok_or(LifecycleError::MissingBounceReason)?;
            if check.bounced_date.is_none() {
                plan.bounced_date = Some(effective);
            }
            if check.bounced_reason.is_none() {
                plan.bounced_reason = Some(reason.to_string());
            }
        }
        CheckStatus::Pending
        | CheckStatus::Cancelled
        | CheckStatus::Cashed
        | CheckStatus::Transferred => {}
    }

    Ok(plan)
}
