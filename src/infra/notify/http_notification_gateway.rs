use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::ports::NotificationGateway;
use crate::error::AppError;

/// Posts rendered messages to the external delivery service (which fans
/// out to the actual email/SMS providers).
pub struct HttpNotificationGateway {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpNotificationGateway {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct NotifyPayload<'a> {
    channel: &'a str,
    recipient: &'a str,
    subject: Option<&'a str>,
    body: &'a str,
}

#[async_trait]
impl NotificationGateway for HttpNotificationGateway {
    async fn send(
        &self,
        channel: &str,
        recipient: &str,
        subject: Option<&str>,
        body: &str,
    ) -> Result<(), AppError> {
        let payload = NotifyPayload { channel, recipient, subject, body };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::InternalWithMsg(format!("Notify request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::InternalWithMsg(format!(
                "Notify service returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
