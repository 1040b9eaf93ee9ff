use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::models::client::Client;
use crate::domain::ports::ClientRepository;
use crate::error::AppError;

pub struct SqliteClientRepo {
    pool: SqlitePool,
}

impl SqliteClientRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for SqliteClientRepo {
    async fn create(&self, client: &Client) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (phone, name, email, is_blacklisted, blacklist_reason, no_show_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&client.phone)
        .bind(&client.name)
        .bind(&client.email)
        .bind(client.is_blacklisted)
        .bind(&client.blacklist_reason)
        .bind(client.no_show_count)
        .bind(client.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Client>, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE phone = ?")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, client: &Client) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET name = ?, email = ?, is_blacklisted = ?, blacklist_reason = ?, no_show_count = ?
             WHERE phone = ?
             RETURNING *",
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(client.is_blacklisted)
        .bind(&client.blacklist_reason)
        .bind(client.no_show_count)
        .bind(&client.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
