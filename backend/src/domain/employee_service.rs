//! Employee service: staff registry CRUD.
use chrono::Utc;
use shared::{
    CreateEmployeeRequest, EmployeeDto, EmployeeListResponse, PageInfo, UpdateEmployeeRequest,
};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::error::DomainError;
use crate::domain::models::employee::Employee;
use crate::storage::employee_repository::EmployeeRepository;

const NOT_FOUND: &str = "Employee not found";
const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct EmployeeListQuery {
    pub active_only: bool,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone)]
pub struct EmployeeService {
    repository: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: EmployeeRepository::new(db),
        }
    }

    pub async fn create(&self, request: CreateEmployeeRequest) -> Result<EmployeeDto, DomainError> {
        info!("Creating employee {}", request.code);

        if request.code.trim().is_empty() {
            return Err(DomainError::validation("Employee code is required"));
        }
        if request.name.trim().is_empty() {
            return Err(DomainError::validation("Name is required"));
        }
        if request.base_salary < 0.0 {
            return Err(DomainError::validation("Base salary may not be negative"));
        }
        let hired_at = match request.hired_at.as_deref() {
            Some(raw) => shared::parse_wire_date(raw).map_err(DomainError::Validation)?,
            None => Utc::now(),
        };

        if self.repository.code_exists(&request.code).await? {
            return Err(DomainError::validation(
                "An employee with this code already exists",
            ));
        }

        let employee = Employee {
            id: Employee::generate_id(),
            code: request.code,
            name: request.name,
            role: request.role,
            base_salary: request.base_salary,
            active: true,
            hired_at,
        };
        self.repository.insert(&employee).await?;
        Ok(to_dto(&employee))
    }

    pub async fn get(&self, id: &str) -> Result<EmployeeDto, DomainError> {
        let employee = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;
        Ok(to_dto(&employee))
    }

    pub async fn list(&self, query: EmployeeListQuery) -> Result<EmployeeListResponse, DomainError> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (i64::from(page) - 1) * i64::from(per_page);

        let (employees, total) = self
            .repository
            .list(query.active_only, per_page, offset)
            .await?;
        Ok(EmployeeListResponse {
            employees: employees.iter().map(to_dto).collect(),
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
        request: UpdateEmployeeRequest,
    ) -> Result<EmployeeDto, DomainError> {
        let mut employee = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("Name is required"));
            }
            employee.name = name;
        }
        if let Some(role) = request.role {
            employee.role = role;
        }
        if let Some(base_salary) = request.base_salary {
            if base_salary < 0.0 {
                return Err(DomainError::validation("Base salary may not be negative"));
            }
            employee.base_salary = base_salary;
        }
        if let Some(active) = request.active {
            employee.active = active;
        }

        if !self.repository.update_fields(&employee).await? {
            return Err(DomainError::not_found(NOT_FOUND));
        }
        Ok(to_dto(&employee))
    }
}

fn to_dto(employee: &Employee) -> EmployeeDto {
    EmployeeDto {
        id: employee.id.clone(),
        code: employee.code.clone(),
        name: employee.name.clone(),
        role: employee.role.clone(),
        base_salary: employee.base_salary,
        active: employee.active,
        hired_at: employee.hired_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_service() -> EmployeeService {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        EmployeeService::new(db)
    }

    fn goldsmith_request(code: &str) -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            code: code.to_string(),
            name: "Aram Zargar".to_string(),
            role: "goldsmith".to_string(),
            base_salary: 1800.0,
            hired_at: Some("2024-03-01".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = create_test_service().await;
        let employee = service.create(goldsmith_request("EMP-1")).await.unwrap();

        assert!(employee.active);
        assert_eq!(employee.hired_at, "2024-03-01T00:00:00+00:00");
        assert_eq!(service.get(&employee.id).await.unwrap(), employee);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let service = create_test_service().await;
        service.create(goldsmith_request("EMP-1")).await.unwrap();

        let err = service.create(goldsmith_request("EMP-1")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_deactivate_via_update_and_filtered_listing() {
        let service = create_test_service().await;
        let employee = service.create(goldsmith_request("EMP-1")).await.unwrap();
        service.create(goldsmith_request("EMP-2")).await.unwrap();

        service
            .update(
                &employee.id,
                UpdateEmployeeRequest {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let active = service
            .list(EmployeeListQuery {
                active_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.pagination.total_items, 1);

        let all = service.list(EmployeeListQuery::default()).await.unwrap();
        assert_eq!(all.pagination.total_items, 2);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let service = create_test_service().await;

        let err = service.get("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = service
            .update("missing", UpdateEmployeeRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
