use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Clients are keyed by phone number; there is no separate account system.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Client {
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_blacklisted: bool,
    pub blacklist_reason: Option<String>,
    pub no_show_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(phone: String, name: Option<String>, email: Option<String>) -> Self {
        Self {
            phone,
            name,
            email,
            is_blacklisted: false,
            blacklist_reason: None,
            no_show_count: 0,
            created_at: Utc::now(),
        }
    }
}
