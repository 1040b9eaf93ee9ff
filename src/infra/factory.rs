use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::Config;
use crate::domain::services::booking_manager::BookingManager;
use crate::domain::services::filler::FillerScheduler;
use crate::domain::services::notifications::Notifier;
use crate::infra::calendar::http_calendar_sync::HttpCalendarSync;
use crate::infra::notify::http_notification_gateway::HttpNotificationGateway;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo, sqlite_client_repo::SqliteClientRepo,
    sqlite_exception_repo::SqliteExceptionRepo, sqlite_service_repo::SqliteServiceRepo,
    sqlite_settings_repo::SqliteSettingsRepo, sqlite_template_repo::SqliteTemplateRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    build_state(config.clone(), pool)
}

pub fn build_state(config: Config, pool: SqlitePool) -> AppState {
    let service_repo = Arc::new(SqliteServiceRepo::new(pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
    let client_repo = Arc::new(SqliteClientRepo::new(pool.clone()));
    let exception_repo = Arc::new(SqliteExceptionRepo::new(pool.clone()));
    let settings_repo = Arc::new(SqliteSettingsRepo::new(pool.clone()));
    let template_repo = Arc::new(SqliteTemplateRepo::new(pool.clone()));

    let notification_gateway = Arc::new(HttpNotificationGateway::new(
        config.notify_service_url.clone(),
        config.notify_service_token.clone(),
    ));
    let calendar_sync = Arc::new(HttpCalendarSync::new(
        config.calendar_sync_url.clone(),
        config.calendar_sync_token.clone(),
    ));

    let notifier = Arc::new(Notifier::new(template_repo.clone(), notification_gateway.clone()));
    let booking_manager = Arc::new(BookingManager::new(
        booking_repo.clone(),
        service_repo.clone(),
        client_repo.clone(),
        exception_repo.clone(),
        notifier.clone(),
        calendar_sync.clone(),
    ));
    let filler = Arc::new(FillerScheduler::new(
        booking_manager.clone(),
        booking_repo.clone(),
        service_repo.clone(),
    ));

    AppState {
        config,
        service_repo,
        booking_repo,
        client_repo,
        exception_repo,
        settings_repo,
        template_repo,
        notification_gateway,
        calendar_sync,
        notifier,
        booking_manager,
        filler,
    }
}
