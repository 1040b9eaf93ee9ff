use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_min: i32,
    pub preparation_min: i32,
    pub price_cents: i64,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

pub struct NewServiceParams {
    pub name: String,
    pub duration_min: i32,
    pub preparation_min: i32,
    pub price_cents: i64,
    pub sort_order: i32,
}

impl Service {
    pub fn new(params: NewServiceParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            duration_min: params.duration_min,
            preparation_min: params.preparation_min,
            price_cents: params.price_cents,
            is_active: true,
            sort_order: params.sort_order,
            created_at: Utc::now(),
        }
    }

    /// Minutes a booking of this service keeps the chair busy, before any
    /// configured break is appended.
    pub fn occupied_min(&self) -> i32 {
        self.duration_min + self.preparation_min
    }
}
