use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::models::booking::Booking;
use crate::domain::ports::{CalendarAction, CalendarSync};
use crate::domain::services::time::minutes_to_time;
use crate::error::AppError;

/// Mirrors bookings into the external calendar service. The OAuth and
/// token-refresh plumbing lives on the other side of this endpoint.
pub struct HttpCalendarSync {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpCalendarSync {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct CalendarPayload<'a> {
    action: &'a str,
    booking_id: &'a str,
    event_id: Option<&'a str>,
    date: String,
    start_time: String,
    end_time: String,
    summary: &'a str,
}

#[derive(Deserialize)]
struct CalendarResponse {
    event_id: Option<String>,
}

#[async_trait]
impl CalendarSync for HttpCalendarSync {
    async fn push(
        &self,
        action: CalendarAction,
        booking: &Booking,
    ) -> Result<Option<String>, AppError> {
        let action_str = match action {
            CalendarAction::Create => "create",
            CalendarAction::Update => "update",
            CalendarAction::Delete => "delete",
        };

        let payload = CalendarPayload {
            action: action_str,
            booking_id: &booking.id,
            event_id: booking.calendar_event_id.as_deref(),
            date: booking.date.format("%Y-%m-%d").to_string(),
            start_time: minutes_to_time(booking.start_min)?,
            end_time: minutes_to_time(booking.end_min)?,
            summary: &booking.customer_name,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::InternalWithMsg(format!("Calendar request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::InternalWithMsg(format!(
                "Calendar service returned {}",
                response.status()
            )));
        }

        let parsed: CalendarResponse = response
            .json()
            .await
            .map_err(|e| AppError::InternalWithMsg(format!("Calendar response invalid: {}", e)))?;
        Ok(parsed.event_id)
    }
}
