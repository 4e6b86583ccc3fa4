//! Dashboard service: one cross-module aggregate for the landing page.
use shared::{CheckStatusSummary, DashboardSummaryResponse, TradeKindSummary};

use crate::db::DbConnection;
use crate::domain::error::DomainError;
use crate::domain::models::check::CheckKind;
use crate::storage::{
    CheckRepository, EmployeeRepository, ProductRepository, TradeRepository,
};

#[derive(Clone)]
pub struct DashboardService {
    checks: CheckRepository,
    products: ProductRepository,
    employees: EmployeeRepository,
    trades: TradeRepository,
}

impl DashboardService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            checks: CheckRepository::new(db.clone()),
            products: ProductRepository::new(db.clone()),
            employees: EmployeeRepository::new(db.clone()),
            trades: TradeRepository::new(db),
        }
    }

    pub async fn summary(&self) -> Result<DashboardSummaryResponse, DomainError> {
        let checks_by_status = self
            .checks
            .summary()
            .await?
            .into_iter()
            .map(|row| CheckStatusSummary {
                status: row.status.as_str().to_string(),
                count: row.count,
                total_amount: row.total_amount,
            })
            .collect();
        let pending_receivable_amount = self.checks.pending_amount(CheckKind::Receivable).await?;
        let pending_payable_amount = self.checks.pending_amount(CheckKind::Payable).await?;

        let categories = self.products.category_summary().await?;
        let active_products = categories.iter().map(|c| c.count).sum();
        let stock_value = categories.iter().map(|c| c.stock_value).sum();

        let trade_totals = self
            .trades
            .summary()
            .await?
            .into_iter()
            .map(|row| TradeKindSummary {
                kind: row.kind.as_str().to_string(),
                count: row.count,
                total_amount: row.total_amount,
                total_gold_weight_grams: row.total_gold_weight_grams,
            })
            .collect();

        Ok(DashboardSummaryResponse {
            checks_by_status,
            pending_receivable_amount,
            pending_payable_amount,
            active_products,
            stock_value,
            active_employees: self.employees.active_count().await?,
            trade_totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckService, EmployeeService, ProductService, TradeService};
    use shared::{
        CreateCheckRequest, CreateEmployeeRequest, CreateProductRequest, CreateTradeRequest,
    };

    #[tokio::test]
    async fn test_summary_spans_all_modules() {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        let dashboard = DashboardService::new(db.clone());

        CheckService::new(db.clone())
            .create(CreateCheckRequest {
                document_number: "CHK-1".to_string(),
                kind: "receivable".to_string(),
                amount: 900.0,
                bank_name: None,
                party_name: None,
                due_date: None,
                status: None,
            })
            .await
            .unwrap();
        ProductService::new(db.clone())
            .create(CreateProductRequest {
                sku: "RING-001".to_string(),
                name: "18k gold ring".to_string(),
                category: "manufactured".to_string(),
                weight_grams: Some(4.2),
                karat: Some(18),
                unit_price: 950.0,
                stock: Some(2),
            })
            .await
            .unwrap();
        EmployeeService::new(db.clone())
            .create(CreateEmployeeRequest {
                code: "EMP-1".to_string(),
                name: "Aram Zargar".to_string(),
                role: "goldsmith".to_string(),
                base_salary: 1800.0,
                hired_at: None,
            })
            .await
            .unwrap();
        TradeService::new(db)
            .create(CreateTradeRequest {
                kind: "sale".to_string(),
                party_name: "Walk-in".to_string(),
                total_amount: 3200.0,
                gold_weight_grams: None,
                note: None,
            })
            .await
            .unwrap();

        let summary = dashboard.summary().await.unwrap();
        assert_eq!(summary.pending_receivable_amount, 900.0);
        assert_eq!(summary.pending_payable_amount, 0.0);
        assert_eq!(summary.active_products, 1);
        assert_eq!(summary.stock_value, 1900.0);
        assert_eq!(summary.active_employees, 1);
        assert_eq!(summary.trade_totals.len(), 1);
        assert_eq!(summary.checks_by_status.len(), 1);
        assert_eq!(summary.checks_by_status[0].status, "pending");
    }

    #[tokio::test]
    async fn test_summary_on_empty_database() {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        let summary = DashboardService::new(db).summary().await.unwrap();

        assert!(summary.checks_by_status.is_empty());
        assert_eq!(summary.pending_receivable_amount, 0.0);
        assert_eq!(summary.active_products, 0);
        assert_eq!(summary.stock_value, 0.0);
        assert_eq!(summary.active_employees, 0);
        assert!(summary.trade_totals.is_empty());
    }
}
