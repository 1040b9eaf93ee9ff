use std::sync::Arc;

use crate::config::Config;
use crate::domain::models::settings::BookingSettings;
use crate::domain::ports::{
    BookingRepository, CalendarSync, ClientRepository, NotificationGateway,
    ScheduleExceptionRepository, ServiceRepository, SettingsRepository, TemplateRepository,
};
use crate::domain::services::booking_manager::BookingManager;
use crate::domain::services::filler::FillerScheduler;
use crate::domain::services::notifications::Notifier;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub client_repo: Arc<dyn ClientRepository>,
    pub exception_repo: Arc<dyn ScheduleExceptionRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub template_repo: Arc<dyn TemplateRepository>,
    pub notification_gateway: Arc<dyn NotificationGateway>,
    pub calendar_sync: Arc<dyn CalendarSync>,
    pub notifier: Arc<Notifier>,
    pub booking_manager: Arc<BookingManager>,
    pub filler: Arc<FillerScheduler>,
}

impl AppState {
    /// Settings are materialized per request so admin edits apply without
    /// a restart; the engine itself only ever sees the immutable struct.
    pub async fn booking_settings(&self) -> Result<BookingSettings, AppError> {
        let map = self.settings_repo.get_all().await?;
        BookingSettings::from_map(&map)
    }
}
