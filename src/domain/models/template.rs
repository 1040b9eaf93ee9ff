use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tera template for one notification kind on one channel.
/// `subject` is only meaningful for the email channel.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MessageTemplate {
    pub id: String,
    pub kind: String,
    pub channel: String,
    pub subject: Option<String>,
    pub body: String,
    pub updated_at: DateTime<Utc>,
}

impl MessageTemplate {
    pub fn new(kind: String, channel: String, subject: Option<String>, body: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            channel,
            subject,
            body,
            updated_at: Utc::now(),
        }
    }
}
