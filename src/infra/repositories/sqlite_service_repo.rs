use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::models::service::Service;
use crate::domain::ports::ServiceRepository;
use crate::error::AppError;

pub struct SqliteServiceRepo {
    pool: SqlitePool,
}

impl SqliteServiceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepo {
    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, name, duration_min, preparation_min, price_cents, is_active, sort_order, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(service.duration_min)
        .bind(service.preparation_min)
        .bind(service.price_cents)
        .bind(service.is_active)
        .bind(service.sort_order)
        .bind(service.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active(&self) -> Result<Vec<Service>, AppError> {
        sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE is_active = 1 ORDER BY sort_order ASC, name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY sort_order ASC, name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "UPDATE services SET name = ?, duration_min = ?, preparation_min = ?, price_cents = ?,
                 is_active = ?, sort_order = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&service.name)
        .bind(service.duration_min)
        .bind(service.preparation_min)
        .bind(service.price_cents)
        .bind(service.is_active)
        .bind(service.sort_order)
        .bind(&service.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
