use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::models::template::MessageTemplate;
use crate::domain::ports::TemplateRepository;
use crate::error::AppError;

pub struct SqliteTemplateRepo {
    pool: SqlitePool,
}

impl SqliteTemplateRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for SqliteTemplateRepo {
    async fn create(&self, template: &MessageTemplate) -> Result<MessageTemplate, AppError> {
        sqlx::query_as::<_, MessageTemplate>(
            "INSERT INTO message_templates (id, kind, channel, subject, body, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&template.id)
        .bind(&template.kind)
        .bind(&template.channel)
        .bind(&template.subject)
        .bind(&template.body)
        .bind(template.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MessageTemplate>, AppError> {
        sqlx::query_as::<_, MessageTemplate>("SELECT * FROM message_templates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_kind_and_channel(
        &self,
        kind: &str,
        channel: &str,
    ) -> Result<Option<MessageTemplate>, AppError> {
        sqlx::query_as::<_, MessageTemplate>(
            "SELECT * FROM message_templates WHERE kind = ? AND channel = ?",
        )
        .bind(kind)
        .bind(channel)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<MessageTemplate>, AppError> {
        sqlx::query_as::<_, MessageTemplate>(
            "SELECT * FROM message_templates ORDER BY kind ASC, channel ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, template: &MessageTemplate) -> Result<MessageTemplate, AppError> {
        sqlx::query_as::<_, MessageTemplate>(
            "UPDATE message_templates SET kind = ?, channel = ?, subject = ?, body = ?, updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&template.kind)
        .bind(&template.channel)
        .bind(&template.subject)
        .bind(&template.body)
        .bind(template.updated_at)
        .bind(&template.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM message_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Template not found".into()));
        }
        Ok(())
    }
}
