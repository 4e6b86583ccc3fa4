//! Inventory service: catalog CRUD with soft delete and stock tracking.
use chrono::Utc;
use shared::{
    Ack, AdjustStockRequest, CategorySummary, CreateProductRequest, PageInfo, ProductDto,
    ProductListResponse, ProductSummaryResponse, UpdateProductRequest,
};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::error::DomainError;
use crate::domain::models::product::{Product, ProductCategory};
use crate::storage::product_repository::{ProductListFilter, ProductRepository};

const NOT_FOUND: &str = "Product not found";
const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub category: Option<String>,
    /// Include soft-deleted products when true
    pub include_inactive: bool,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone)]
pub struct ProductService {
    repository: ProductRepository,
}

impl ProductService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: ProductRepository::new(db),
        }
    }

    pub async fn create(&self, request: CreateProductRequest) -> Result<ProductDto, DomainError> {
        info!("Creating product {}", request.sku);

        if request.sku.trim().is_empty() {
            return Err(DomainError::validation("SKU is required"));
        }
        if request.name.trim().is_empty() {
            return Err(DomainError::validation("Name is required"));
        }
        if request.unit_price < 0.0 {
            return Err(DomainError::validation("Unit price may not be negative"));
        }
        let category = ProductCategory::parse(&request.category).map_err(DomainError::Validation)?;
        let stock = request.stock.unwrap_or(0);
        if stock < 0 {
            return Err(DomainError::validation("Stock may not be negative"));
        }

        if self.repository.sku_exists(&request.sku).await? {
            return Err(DomainError::validation(
                "A product with this SKU already exists",
            ));
        }

        let product = Product {
            id: Product::generate_id(),
            sku: request.sku,
            name: request.name,
            category,
            weight_grams: request.weight_grams,
            karat: request.karat,
            unit_price: request.unit_price,
            stock,
            active: true,
            created_at: Utc::now(),
        };
        self.repository.insert(&product).await?;
        Ok(to_dto(&product))
    }

    pub async fn get(&self, id: &str) -> Result<ProductDto, DomainError> {
        let product = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;
        Ok(to_dto(&product))
    }

    pub async fn list(&self, query: ProductListQuery) -> Result<ProductListResponse, DomainError> {
        let filter = ProductListFilter {
            category: query
                .category
                .as_deref()
                .map(ProductCategory::parse)
                .transpose()
                .map_err(DomainError::Validation)?,
            active_only: !query.include_inactive,
            search: query.search,
        };
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (i64::from(page) - 1) * i64::from(per_page);

        let (products, total) = self.repository.list(&filter, per_page, offset).await?;
        Ok(ProductListResponse {
            products: products.iter().map(to_dto).collect(),
            pagination: PageInfo {
                page,
                per_page,
                total_items: total,
                total_pages: total.div_ceil(per_page as u64) as u32,
            },
        })
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateProductRequest,
    ) -> Result<ProductDto, DomainError> {
        let mut product = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("Name is required"));
            }
            product.name = name;
        }
        if let Some(category) = request.category.as_deref() {
            product.category = ProductCategory::parse(category).map_err(DomainError::Validation)?;
        }
        if let Some(weight_grams) = request.weight_grams {
            product.weight_grams = Some(weight_grams);
        }
        if let Some(karat) = request.karat {
            product.karat = Some(karat);
        }
        if let Some(unit_price) = request.unit_price {
            if unit_price < 0.0 {
                return Err(DomainError::validation("Unit price may not be negative"));
            }
            product.unit_price = unit_price;
        }

        if !self.repository.update_fields(&product).await? {
            return Err(DomainError::not_found(NOT_FOUND));
        }
        Ok(to_dto(&product))
    }

    /// Soft delete: the product is delisted, never physically removed.
    pub async fn remove(&self, id: &str) -> Result<Ack, DomainError> {
        let product = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;

        if !product.active {
            return Err(DomainError::validation("Product is already inactive"));
        }
        self.repository.set_active(id, false).await?;
        info!("Deactivated product {}", id);
        Ok(Ack {
            success: true,
            message: "Product deactivated".to_string(),
        })
    }

    /// Adjust stock by a signed delta; the result may not go negative.
    pub async fn adjust_stock(
        &self,
        id: &str,
        request: AdjustStockRequest,
    ) -> Result<ProductDto, DomainError> {
        // Existence first, so a missing id is NotFound rather than a
        // failed stock guard
        let product = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;

        match self.repository.adjust_stock(id, request.delta).await? {
            Some(updated) => Ok(to_dto(&updated)),
            None => Err(DomainError::validation(format!(
                "Insufficient stock: {} on hand, adjustment {}",
                product.stock, request.delta
            ))),
        }
    }

    pub async fn summary(&self) -> Result<ProductSummaryResponse, DomainError> {
        let rows = self.repository.category_summary().await?;
        Ok(ProductSummaryResponse {
            categories: rows
                .into_iter()
                .map(|row| CategorySummary {
                    category: row.category.as_str().to_string(),
                    count: row.count,
                    total_stock: row.total_stock,
                    stock_value: row.stock_value,
                })
                .collect(),
        })
    }
}

fn to_dto(product: &Product) -> ProductDto {
    ProductDto {
        id: product.id.clone(),
        sku: product.sku.clone(),
        name: product.name.clone(),
        category: product.category.as_str().to_string(),
        weight_grams: product.weight_grams,
        karat: product.karat,
        unit_price: product.unit_price,
        stock: product.stock,
        active: product.active,
        created_at: product.created_at.to_rfc3339(),
    }
}
