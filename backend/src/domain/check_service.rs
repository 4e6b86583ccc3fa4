//! Check service: orchestrates lookup, transition validation and
//! persistence for the financial-document lifecycle.
use chrono::{DateTime, Utc};
use shared::{
    Ack, CheckDto, CheckListResponse, CheckStatusSummary, CheckSummaryResponse,
    CreateCheckRequest, PageInfo, UpdateCheckRequest, UpdateCheckStatusRequest,
};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::check_lifecycle::plan_transition;
use crate::domain::error::DomainError;
use crate::domain::models::check::{Check, CheckKind, CheckStatus};
use crate::storage::check_repository::{CheckListFilter, CheckRepository};

const NOT_FOUND: &str = "Check not found";
const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// List filters as they arrive from the query string.
#[derive(Debug, Clone, Default)]
pub struct CheckListQuery {
    pub status: Option<String>,
    pub kind: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone)]
pub struct CheckService {
    repository: CheckRepository,
}

impl CheckService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: CheckRepository::new(db),
        }
    }

    pub async fn create(&self, request: CreateCheckRequest) -> Result<CheckDto, DomainError> {
        info!("Creating check {}", request.document_number);

        if request.document_number.trim().is_empty() {
            return Err(DomainError::validation("Document number is required"));
        }
        if request.amount <= 0.0 {
            return Err(DomainError::validation("Amount must be positive"));
        }
        let kind = CheckKind::parse(&request.kind).map_err(DomainError::Validation)?;
        let status = match &request.status {
            Some(s) => CheckStatus::parse(s).map_err(DomainError::Validation)?,
            None => CheckStatus::Pending,
        };
        let due_date = parse_optional_date(request.due_date.as_deref())?;

        if self
            .repository
            .document_number_exists(&request.document_number)
            .await?
        {
            return Err(DomainError::validation(
                "A check with this document number already exists",
            ));
        }

        let check = Check {
            id: Check::generate_id(),
            document_number: request.document_number,
            kind,
            status,
            amount: request.amount,
            bank_name: request.bank_name,
            party_name: request.party_name,
            due_date,
            deposited_date: None,
            cleared_date: None,
            bounced_date: None,
            bounced_reason: None,
            created_at: Utc::now(),
        };
        self.repository.insert(&check).await?;
        Ok(to_dto(&check))
    }

    pub async fn get(&self, id: &str) -> Result<CheckDto, DomainError> {
        let check = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;
        Ok(to_dto(&check))
    }

    pub async fn list(&self, query: CheckListQuery) -> Result<CheckListResponse, DomainError> {
        let filter = CheckListFilter {
            status: query
                .status
                .as_deref()
                .map(CheckStatus::parse)
                .transpose()
                .map_err(DomainError::Validation)?,
            kind: query
                .kind
                .as_deref()
                .map(CheckKind::parse)
                .transpose()
                .map_err(DomainError::Validation)?,
            search: query.search,
        };
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (i64::from(page) - 1) * i64::from(per_page);

        let (checks, total) = self.repository.list(&filter, per_page, offset).await?;
        Ok(CheckListResponse {
            checks: checks.iter().map(to_dto).collect(),
            pagination: page_info(page, per_page, total),
        })
    }

    /// Apply a requested status transition.
    ///
    /// Fails NotFound when the id is unknown and Validation when the
    /// lifecycle rejects the request; nothing is persisted on failure.
    pub async fn update_status(
        &self,
        id: &str,
        request: UpdateCheckStatusRequest,
    ) -> Result<CheckDto, DomainError> {
        info!("Updating check {} status -> {}", id, request.status);

        let requested = CheckStatus::parse(&request.status).map_err(DomainError::Validation)?;
        let effective = match request.date.as_deref() {
            Some(raw) => shared::parse_wire_date(raw).map_err(DomainError::Validation)?,
            None => Utc::now(),
        };

        let check = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;

        let plan = plan_transition(&check, requested, request.reason.as_deref(), effective)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if !self.repository.apply_transition(id, &plan).await? {
            return Err(DomainError::not_found(NOT_FOUND));
        }
        Ok(to_dto(&plan.apply(&check)))
    }

    /// Partial update of descriptive fields; unset fields are unchanged.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateCheckRequest,
    ) -> Result<CheckDto, DomainError> {
        let mut check = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;

        if check.status.is_settled() {
            return Err(DomainError::validation(
                "Cannot edit a check that has been cleared or cashed",
            ));
        }

        if let Some(document_number) = request.document_number {
            if document_number.trim().is_empty() {
                return Err(DomainError::validation("Document number is required"));
            }
            if document_number != check.document_number
                && self.repository.document_number_exists(&document_number).await?
            {
                return Err(DomainError::validation(
                    "A check with this document number already exists",
                ));
            }
            check.document_number = document_number;
        }
        if let Some(amount) = request.amount {
            if amount <= 0.0 {
                return Err(DomainError::validation("Amount must be positive"));
            }
            check.amount = amount;
        }
        if let Some(bank_name) = request.bank_name {
            check.bank_name = Some(bank_name);
        }
        if let Some(party_name) = request.party_name {
            check.party_name = Some(party_name);
        }
        if let Some(due_date) = request.due_date.as_deref() {
            check.due_date = Some(shared::parse_wire_date(due_date).map_err(DomainError::Validation)?);
        }

        if !self.repository.update_fields(&check).await? {
            return Err(DomainError::not_found(NOT_FOUND));
        }
        Ok(to_dto(&check))
    }

    /// Delete a check unless it has been processed.
    pub async fn remove(&self, id: &str) -> Result<Ack, DomainError> {
        let check = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;

        if check.status.blocks_deletion() {
            return Err(DomainError::validation(
                "Cannot delete a check that has been processed. Cancel it instead.",
            ));
        }

        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(NOT_FOUND));
        }
        info!("Deleted check {}", id);
        Ok(Ack {
            success: true,
            message: "Check deleted".to_string(),
        })
    }

    pub async fn summary(&self) -> Result<CheckSummaryResponse, DomainError> {
        let rows = self.repository.summary().await?;
        Ok(CheckSummaryResponse {
            statuses: rows
                .into_iter()
                .map(|row| CheckStatusSummary {
                    status: row.status.as_str().to_string(),
                    count: row.count,
                    total_amount: row.total_amount,
                })
                .collect(),
        })
    }
}

fn parse_optional_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, DomainError> {
    raw.map(shared::parse_wire_date)
        .transpose()
        .map_err(DomainError::Validation)
}

fn page_info(page: u32, per_page: u32, total: u64) -> PageInfo {
    PageInfo {
        page,
        per_page,
        total_items: total,
        total_pages: total.div_ceil(per_page as u64) as u32,
    }
}

fn to_dto(check: &Check) -> CheckDto {
    CheckDto {
        id: check.id.clone(),
        document_number: check.document_number.clone(),
        kind: check.kind.as_str().to_string(),
        status: check.status.as_str().to_string(),
        amount: check.amount,
        bank_name: check.bank_name.clone(),
        party_name: check.party_name.clone(),
        due_date: check.due_date.map(|d| d.to_rfc3339()),
        deposited_date: check.deposited_date.map(|d| d.to_rfc3339()),
        cleared_date: check.cleared_date.map(|d| d.to_rfc3339()),
        bounced_date: check.bounced_date.map(|d| d.to_rfc3339()),
        bounced_reason: check.bounced_reason.clone(),
        created_at: check.created_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_service() -> CheckService {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        CheckService::new(db)
    }

    fn create_request(document_number: &str) -> CreateCheckRequest {
        CreateCheckRequest {
            document_number: document_number.to_string(),
            kind: "receivable".to_string(),
            amount: 5_000_000.0,
            bank_name: Some("Melli".to_string()),
            party_name: Some("Tehrani Jewelers".to_string()),
            due_date: None,
            status: None,
        }
    }

    fn status_request(status: &str, reason: Option<&str>, date: Option<&str>) -> UpdateCheckStatusRequest {
        UpdateCheckStatusRequest {
            status: status.to_string(),
            reason: reason.map(str::to_string),
            date: date.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        assert_eq!(check.status, "pending");
        assert_eq!(check.amount, 5_000_000.0);
        assert!(check.deposited_date.is_none());
        assert!(check.cleared_date.is_none());
        assert!(check.bounced_date.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_document_number() {
        let service = create_test_service().await;
        service.create(create_request("CHK-1")).await.unwrap();

        let err = service.create(create_request("CHK-1")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_amount() {
        let service = create_test_service().await;
        let mut request = create_request("CHK-1");
        request.amount = 0.0;

        let err = service.create(request).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    // Property 1: Pending -> Deposited stamps deposited_date only.
    #[tokio::test]
    async fn test_deposit_stamps_deposited_date() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        let updated = service
            .update_status(&check.id, status_request("deposited", None, Some("2025-01-10")))
            .await
            .unwrap();

        assert_eq!(updated.status, "deposited");
        assert_eq!(updated.deposited_date.as_deref(), Some("2025-01-10T00:00:00+00:00"));
        assert!(updated.cleared_date.is_none());
        assert!(updated.bounced_date.is_none());

        // Persisted, not just shaped
        let fetched = service.get(&check.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_deposit_defaults_effective_date_to_now() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        let before = Utc::now();
        let updated = service
            .update_status(&check.id, status_request("deposited", None, None))
            .await
            .unwrap();

        let stamped = DateTime::parse_from_rfc3339(updated.deposited_date.as_deref().unwrap())
            .unwrap()
            .with_timezone(&Utc);
        assert!(stamped >= before && stamped <= Utc::now());
    }

    // Property 2: clearing without a prior deposit backfills deposited_date.
    #[tokio::test]
    async fn test_clear_without_deposit_backfills_both_dates() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        let updated = service
            .update_status(&check.id, status_request("cleared", None, Some("2025-01-10")))
            .await
            .unwrap();

        assert_eq!(updated.status, "cleared");
        assert_eq!(updated.deposited_date.as_deref(), Some("2025-01-10T00:00:00+00:00"));
        assert_eq!(updated.cleared_date.as_deref(), Some("2025-01-10T00:00:00+00:00"));
        assert!(updated.bounced_date.is_none());
        assert!(updated.bounced_reason.is_none());
    }

    // Property 3: clearing after a deposit keeps the deposit date.
    #[tokio::test]
    async fn test_clear_after_deposit_keeps_deposited_date() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        service
            .update_status(&check.id, status_request("deposited", None, Some("2025-01-05")))
            .await
            .unwrap();
        let updated = service
            .update_status(&check.id, status_request("cleared", None, Some("2025-01-10")))
            .await
            .unwrap();

        assert_eq!(updated.deposited_date.as_deref(), Some("2025-01-05T00:00:00+00:00"));
        assert_eq!(updated.cleared_date.as_deref(), Some("2025-01-10T00:00:00+00:00"));
    }

    // Property 4: bounce without reason is rejected and nothing mutates.
    #[tokio::test]
    async fn test_bounce_without_reason_rejected_and_unchanged() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        for reason in [None, Some(""), Some("   ")] {
            let err = service
                .update_status(&check.id, status_request("bounced", reason, None))
                .await
                .unwrap_err();
            match err {
                DomainError::Validation(message) => {
                    assert_eq!(message, "Reason is required for bounced checks")
                }
                other => panic!("expected Validation, got {:?}", other),
            }
        }

        let fetched = service.get(&check.id).await.unwrap();
        assert_eq!(fetched.status, "pending");
        assert!(fetched.bounced_date.is_none());
        assert!(fetched.bounced_reason.is_none());
    }

    // Property 5: bounce with a reason stamps date and reason.
    #[tokio::test]
    async fn test_bounce_with_reason_stamps_fields() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        let updated = service
            .update_status(
                &check.id,
                status_request("bounced", Some("Insufficient funds"), Some("2025-01-10")),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, "bounced");
        assert_eq!(updated.bounced_date.as_deref(), Some("2025-01-10T00:00:00+00:00"));
        assert_eq!(updated.bounced_reason.as_deref(), Some("Insufficient funds"));
    }

    #[tokio::test]
    async fn test_second_deposit_does_not_restamp() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        service
            .update_status(&check.id, status_request("deposited", None, Some("2025-01-05")))
            .await
            .unwrap();
        let updated = service
            .update_status(&check.id, status_request("deposited", None, Some("2025-01-20")))
            .await
            .unwrap();

        assert_eq!(updated.deposited_date.as_deref(), Some("2025-01-05T00:00:00+00:00"));
    }

    #[tokio::test]
    async fn test_update_status_rejects_unknown_status() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        let err = service
            .update_status(&check.id, status_request("shredded", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    // Property 6: deletion guard.
    #[tokio::test]
    async fn test_delete_blocked_for_processed_statuses() {
        let service = create_test_service().await;

        for (i, status) in ["deposited", "cleared", "cashed"].iter().enumerate() {
            let check = service
                .create(create_request(&format!("CHK-{}", i)))
                .await
                .unwrap();
            service
                .update_status(&check.id, status_request(status, None, None))
                .await
                .unwrap();

            let err = service.remove(&check.id).await.unwrap_err();
            match err {
                DomainError::Validation(message) => assert_eq!(
                    message,
                    "Cannot delete a check that has been processed. Cancel it instead."
                ),
                other => panic!("expected Validation, got {:?}", other),
            }
            // Still retrievable
            assert!(service.get(&check.id).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_delete_allowed_for_unprocessed_statuses() {
        let service = create_test_service().await;

        let scenarios: [(&str, Option<&str>); 3] =
            [("pending", None), ("bounced", Some("No funds")), ("cancelled", None)];
        for (i, (status, reason)) in scenarios.iter().enumerate() {
            let check = service
                .create(create_request(&format!("CHK-{}", i)))
                .await
                .unwrap();
            if *status != "pending" {
                service
                    .update_status(&check.id, status_request(status, *reason, None))
                    .await
                    .unwrap();
            }

            let ack = service.remove(&check.id).await.unwrap();
            assert!(ack.success);
            assert_eq!(ack.message, "Check deleted");

            let err = service.get(&check.id).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound(_)));
        }
    }

    // Property 7: settled documents reject descriptive edits.
    #[tokio::test]
    async fn test_update_blocked_when_settled() {
        let service = create_test_service().await;

        for (i, status) in ["cleared", "cashed"].iter().enumerate() {
            let check = service
                .create(create_request(&format!("CHK-{}", i)))
                .await
                .unwrap();
            service
                .update_status(&check.id, status_request(status, None, None))
                .await
                .unwrap();

            let err = service
                .update(
                    &check.id,
                    UpdateCheckRequest {
                        amount: Some(1.0),
                        ..Default::default()
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));

            // Unchanged
            let fetched = service.get(&check.id).await.unwrap();
            assert_eq!(fetched.amount, 5_000_000.0);
        }
    }

    #[tokio::test]
    async fn test_update_applies_only_supplied_fields() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        let updated = service
            .update(
                &check.id,
                UpdateCheckRequest {
                    amount: Some(750_000.0),
                    bank_name: Some("Saderat".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.amount, 750_000.0);
        assert_eq!(updated.bank_name.as_deref(), Some("Saderat"));
        // Untouched fields
        assert_eq!(updated.document_number, "CHK-1");
        assert_eq!(updated.party_name.as_deref(), Some("Tehrani Jewelers"));
        assert_eq!(updated.status, "pending");
    }

    #[tokio::test]
    async fn test_update_on_deposited_check_is_allowed() {
        // Deposited blocks deletion but not edits
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();
        service
            .update_status(&check.id, status_request("deposited", None, None))
            .await
            .unwrap();

        let updated = service
            .update(
                &check.id,
                UpdateCheckRequest {
                    party_name: Some("Zargari & Sons".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.party_name.as_deref(), Some("Zargari & Sons"));
    }

    // Property 8: unknown ids fail NotFound everywhere.
    #[tokio::test]
    async fn test_operations_on_missing_id_fail_not_found() {
        let service = create_test_service().await;

        let get_err = service.get("missing").await.unwrap_err();
        assert!(matches!(get_err, DomainError::NotFound(_)));
        assert_eq!(get_err.to_string(), "Check not found");

        let status_err = service
            .update_status("missing", status_request("deposited", None, None))
            .await
            .unwrap_err();
        assert!(matches!(status_err, DomainError::NotFound(_)));

        let update_err = service
            .update("missing", UpdateCheckRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(update_err, DomainError::NotFound(_)));

        let remove_err = service.remove("missing").await.unwrap_err();
        assert!(matches!(remove_err, DomainError::NotFound(_)));
    }

    // Example scenario from the lifecycle documentation.
    #[tokio::test]
    async fn test_pending_check_cleared_in_one_step() {
        let service = create_test_service().await;
        let check = service.create(create_request("CHK-1")).await.unwrap();

        let updated = service
            .update_status(&check.id, status_request("cleared", None, Some("2025-01-10")))
            .await
            .unwrap();

        assert_eq!(updated.status, "cleared");
        assert_eq!(updated.deposited_date.as_deref(), Some("2025-01-10T00:00:00+00:00"));
        assert_eq!(updated.cleared_date.as_deref(), Some("2025-01-10T00:00:00+00:00"));
        assert!(updated.bounced_date.is_none());
        assert!(updated.bounced_reason.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_paginates() {
        let service = create_test_service().await;
        for i in 0..5 {
            let check = service
                .create(create_request(&format!("CHK-{}", i)))
                .await
                .unwrap();
            if i < 2 {
                service
                    .update_status(&check.id, status_request("deposited", None, None))
                    .await
                    .unwrap();
            }
        }

        let pending = service
            .list(CheckListQuery {
                status: Some("pending".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(pending.pagination.total_items, 3);
        assert!(pending.checks.iter().all(|c| c.status == "pending"));

        let page = service
            .list(CheckListQuery {
                per_page: Some(2),
                page: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.checks.len(), 2);
        assert_eq!(page.pagination.total_items, 5);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn test_list_handles_huge_page_number() {
        let service = create_test_service().await;
        service.create(create_request("CHK-1")).await.unwrap();

        // Offset math must not overflow for extreme page values
        let far_page = service
            .list(CheckListQuery {
                page: Some(u32::MAX),
                per_page: Some(100),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(far_page.checks.is_empty());
        assert_eq!(far_page.pagination.total_items, 1);
    }

    #[tokio::test]
    async fn test_summary_groups_by_status() {
        let service = create_test_service().await;
        for i in 0..3 {
            let check = service
                .create(create_request(&format!("CHK-{}", i)))
                .await
                .unwrap();
            if i == 0 {
                service
                    .update_status(&check.id, status_request("cleared", None, None))
                    .await
                    .unwrap();
            }
        }

        let summary = service.summary().await.unwrap();
        let pending = summary.statuses.iter().find(|s| s.status == "pending").unwrap();
        assert_eq!(pending.count, 2);
        assert_eq!(pending.total_amount, 10_000_000.0);
        let cleared = summary.statuses.iter().find(|s| s.status == "cleared").unwrap();
        assert_eq!(cleared.count, 1);
    }
}
