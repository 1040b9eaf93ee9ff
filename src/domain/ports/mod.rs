use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::{
    booking::{Booking, BookingStatus},
    client::Client,
    schedule_exception::ScheduleException,
    service::Service,
    template::MessageTemplate,
};
use crate::error::AppError;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError>;
    async fn list_active(&self) -> Result<Vec<Service>, AppError>;
    async fn list_all(&self) -> Result<Vec<Service>, AppError>;
    async fn update(&self, service: &Service) -> Result<Service, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking inside a transaction that re-checks the
    /// non-overlap invariant against pending/confirmed rows on the same
    /// date; fails with `SlotUnavailable` when a concurrent write won.
    async fn create_checked(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// Moves a booking in place under the same transactional overlap
    /// guard, excluding the booking itself from the check.
    async fn reschedule_checked(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError>;
    async fn list_by_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, AppError>;
    /// System bookings for a date, cancelled ones included (the filler's
    /// idempotency guard needs to see what it already touched).
    async fn list_system_by_date(
        &self,
        date: NaiveDate,
        action_day: Option<i32>,
    ) -> Result<Vec<Booking>, AppError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: &Client) -> Result<Client, AppError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Client>, AppError>;
    async fn list(&self) -> Result<Vec<Client>, AppError>;
    async fn update(&self, client: &Client) -> Result<Client, AppError>;
}

#[async_trait]
pub trait ScheduleExceptionRepository: Send + Sync {
    async fn create(&self, exception: &ScheduleException) -> Result<ScheduleException, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ScheduleException>, AppError>;
    async fn list(&self) -> Result<Vec<ScheduleException>, AppError>;
    async fn update(&self, exception: &ScheduleException) -> Result<ScheduleException, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_all(&self) -> Result<HashMap<String, String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create(&self, template: &MessageTemplate) -> Result<MessageTemplate, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<MessageTemplate>, AppError>;
    async fn find_by_kind_and_channel(
        &self,
        kind: &str,
        channel: &str,
    ) -> Result<Option<MessageTemplate>, AppError>;
    async fn list(&self) -> Result<Vec<MessageTemplate>, AppError>;
    async fn update(&self, template: &MessageTemplate) -> Result<MessageTemplate, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Outbound message delivery. Failures are reported per call but never
/// block or roll back the booking mutation that triggered them.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(
        &self,
        channel: &str,
        recipient: &str,
        subject: Option<&str>,
        body: &str,
    ) -> Result<(), AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    Create,
    Update,
    Delete,
}

/// Mirror of bookings into an external visual calendar. Best effort only;
/// the core never depends on its result for correctness.
#[async_trait]
pub trait CalendarSync: Send + Sync {
    async fn push(
        &self,
        action: CalendarAction,
        booking: &Booking,
    ) -> Result<Option<String>, AppError>;
}
