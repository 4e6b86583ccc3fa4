//! Trade service: sale and purchase records.
use chrono::Utc;
use shared::{
    Ack, CreateTradeRequest, PageInfo, TradeDto, TradeKindSummary, TradeListResponse,
    TradeSummaryResponse,
};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::error::DomainError;
use crate::domain::models::trade::{Trade, TradeKind};
use crate::storage::trade_repository::TradeRepository;

const NOT_FOUND: &str = "Trade not found";
const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct TradeListQuery {
    pub kind: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone)]
pub struct TradeService {
    repository: TradeRepository,
}

impl TradeService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: TradeRepository::new(db),
        }
    }

    pub async fn create(&self, request: CreateTradeRequest) -> Result<TradeDto, DomainError> {
        let kind = TradeKind::parse(&request.kind).map_err(DomainError::Validation)?;
        if request.party_name.trim().is_empty() {
            return Err(DomainError::validation("Party name is required"));
        }
        if request.total_amount <= 0.0 {
            return Err(DomainError::validation("Total amount must be positive"));
        }
        if matches!(request.gold_weight_grams, Some(w) if w < 0.0) {
            return Err(DomainError::validation("Gold weight may not be negative"));
        }

        let trade = Trade {
            id: Trade::generate_id(),
            kind,
            party_name: request.party_name,
            total_amount: request.total_amount,
            gold_weight_grams: request.gold_weight_grams,
            note: request.note,
            created_at: Utc::now(),
        };
        self.repository.insert(&trade).await?;
        info!("Recorded {} for {}", trade.kind.as_str(), trade.party_name);
        Ok(to_dto(&trade))
    }

    pub async fn get(&self, id: &str) -> Result<TradeDto, DomainError> {
        let trade = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;
        Ok(to_dto(&trade))
    }

    pub async fn list(&self, query: TradeListQuery) -> Result<TradeListResponse, DomainError> {
        let kind = query
            .kind
            .as_deref()
            .map(TradeKind::parse)
            .transpose()
            .map_err(DomainError::Validation)?;
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (i64::from(page) - 1) * i64::from(per_page);

        let (trades, total) = self.repository.list(kind, per_page, offset).await?;
        Ok(TradeListResponse {
            trades: trades.iter().map(to_dto).collect(),
            pagination: PageInfo {
                page,
                per_page,
                total_items: total,
                total_pages: total.div_ceil(per_page as u64) as u32,
            },
        })
    }

    pub async fn remove(&self, id: &str) -> Result<Ack, DomainError> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(NOT_FOUND));
        }
        Ok(Ack {
            success: true,
            message: "Trade deleted".to_string(),
        })
    }

    pub async fn summary(&self) -> Result<TradeSummaryResponse, DomainError> {
        let rows = self.repository.summary().await?;
        Ok(TradeSummaryResponse {
            kinds: rows
                .into_iter()
                .map(|row| TradeKindSummary {
                    kind: row.kind.as_str().to_string(),
                    count: row.count,
                    total_amount: row.total_amount,
                    total_gold_weight_grams: row.total_gold_weight_grams,
                })
                .collect(),
        })
    }
}

fn to_dto(trade: &Trade) -> TradeDto {
    TradeDto {
        id: trade.id.clone(),
        kind: trade.kind.as_str().to_string(),
        party_name: trade.party_name.clone(),
        total_amount: trade.total_amount,
        gold_weight_grams: trade.gold_weight_grams,
        note: trade.note.clone(),
        created_at: trade.created_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_service() -> TradeService {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        TradeService::new(db)
    }

    fn sale_request(party: &str, amount: f64) -> CreateTradeRequest {
        CreateTradeRequest {
            kind: "sale".to_string(),
            party_name: party.to_string(),
            total_amount: amount,
            gold_weight_grams: Some(12.5),
            note: None,
        }
    }

    #[tokio::test]
    async fn test_create_list_and_delete() {
        let service = create_test_service().await;
        let sale = service.create(sale_request("Walk-in", 3200.0)).await.unwrap();

        let listed = service.list(TradeListQuery::default()).await.unwrap();
        assert_eq!(listed.pagination.total_items, 1);

        let ack = service.remove(&sale.id).await.unwrap();
        assert!(ack.success);
        let err = service.get(&sale.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let service = create_test_service().await;

        let mut bad_kind = sale_request("Walk-in", 100.0);
        bad_kind.kind = "barter".to_string();
        assert!(matches!(
            service.create(bad_kind).await.unwrap_err(),
            DomainError::Validation(_)
        ));

        let zero_amount = sale_request("Walk-in", 0.0);
        assert!(matches!(
            service.create(zero_amount).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_kind() {
        let service = create_test_service().await;
        service.create(sale_request("Walk-in", 100.0)).await.unwrap();
        let mut purchase = sale_request("Refinery", 5000.0);
        purchase.kind = "purchase".to_string();
        service.create(purchase).await.unwrap();

        let sales = service
            .list(TradeListQuery {
                kind: Some("sale".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(sales.pagination.total_items, 1);
        assert_eq!(sales.trades[0].kind, "sale");
    }

    #[tokio::test]
    async fn test_summary_totals_per_kind() {
        let service = create_test_service().await;
        service.create(sale_request("A", 100.0)).await.unwrap();
        service.create(sale_request("B", 250.0)).await.unwrap();

        let summary = service.summary().await.unwrap();
        assert_eq!(summary.kinds.len(), 1);
        let sales = &summary.kinds[0];
        assert_eq!(sales.kind, "sale");
        assert_eq!(sales.count, 2);
        assert_eq!(sales.total_amount, 350.0);
        assert_eq!(sales.total_gold_weight_grams, 25.0);
    }
}
