#![allow(dead_code)]

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Datelike;
use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tower::ServiceExt;
use uuid::Uuid;

use salon_booking::{
    api::router::create_router,
    config::Config,
    domain::models::booking::Booking,
    domain::ports::{CalendarAction, CalendarSync, NotificationGateway},
    domain::services::booking_manager::BookingManager,
    domain::services::filler::FillerScheduler,
    domain::services::notifications::Notifier,
    error::AppError,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo, sqlite_client_repo::SqliteClientRepo,
        sqlite_exception_repo::SqliteExceptionRepo, sqlite_service_repo::SqliteServiceRepo,
        sqlite_settings_repo::SqliteSettingsRepo, sqlite_template_repo::SqliteTemplateRepo,
    },
    state::AppState,
};

pub const ADMIN_KEY: &str = "test-admin-key";

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub channel: String,
    pub recipient: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingNotificationGateway {
    pub sent: Mutex<Vec<SentMessage>>,
}

#[async_trait]
impl NotificationGateway for RecordingNotificationGateway {
    async fn send(
        &self,
        channel: &str,
        recipient: &str,
        _subject: Option<&str>,
        body: &str,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentMessage {
            channel: channel.to_string(),
            recipient: recipient.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingCalendarSync {
    pub pushed: Mutex<Vec<(CalendarAction, String)>>,
}

#[async_trait]
impl CalendarSync for RecordingCalendarSync {
    async fn push(
        &self,
        action: CalendarAction,
        booking: &Booking,
    ) -> Result<Option<String>, AppError> {
        self.pushed.lock().unwrap().push((action, booking.id.clone()));
        Ok(match action {
            CalendarAction::Create => Some(format!("evt-{}", booking.id)),
            _ => None,
        })
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub notifications: Arc<RecordingNotificationGateway>,
    pub calendar: Arc<RecordingCalendarSync>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            admin_api_key: ADMIN_KEY.to_string(),
            notify_service_url: "http://localhost".to_string(),
            notify_service_token: "token".to_string(),
            calendar_sync_url: "http://localhost".to_string(),
            calendar_sync_token: "token".to_string(),
            filler_enabled: false,
        };

        let service_repo = Arc::new(SqliteServiceRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let client_repo = Arc::new(SqliteClientRepo::new(pool.clone()));
        let exception_repo = Arc::new(SqliteExceptionRepo::new(pool.clone()));
        let settings_repo = Arc::new(SqliteSettingsRepo::new(pool.clone()));
        let template_repo = Arc::new(SqliteTemplateRepo::new(pool.clone()));

        let notifications = Arc::new(RecordingNotificationGateway::default());
        let calendar = Arc::new(RecordingCalendarSync::default());

        let notifier = Arc::new(Notifier::new(template_repo.clone(), notifications.clone()));
        let booking_manager = Arc::new(BookingManager::new(
            booking_repo.clone(),
            service_repo.clone(),
            client_repo.clone(),
            exception_repo.clone(),
            notifier.clone(),
            calendar.clone(),
        ));
        let filler = Arc::new(FillerScheduler::new(
            booking_manager.clone(),
            booking_repo.clone(),
            service_repo.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            service_repo,
            booking_repo,
            client_repo,
            exception_repo,
            settings_repo,
            template_repo,
            notification_gateway: notifications.clone(),
            calendar_sync: calendar.clone(),
            notifier,
            booking_manager,
            filler,
        });

        let router = create_router(state.clone());

        Self { router, pool, db_filename, state, notifications, calendar }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        admin: bool,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if admin {
            builder = builder.header("X-Admin-Key", ADMIN_KEY);
        }
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.request(Method::GET, uri, None, false).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> axum::response::Response {
        self.request(Method::POST, uri, Some(body), false).await
    }

    pub async fn admin_get(&self, uri: &str) -> axum::response::Response {
        self.request(Method::GET, uri, None, true).await
    }

    pub async fn admin_post(&self, uri: &str, body: Value) -> axum::response::Response {
        self.request(Method::POST, uri, Some(body), true).await
    }

    pub async fn admin_put(&self, uri: &str, body: Value) -> axum::response::Response {
        self.request(Method::PUT, uri, Some(body), true).await
    }

    /// Creates an active service through the admin API; returns its id.
    pub async fn seed_service(&self, name: &str, duration_min: i32, preparation_min: i32) -> String {
        let res = self
            .admin_post(
                "/api/v1/admin/services",
                serde_json::json!({
                    "name": name,
                    "duration_min": duration_min,
                    "preparation_min": preparation_min,
                }),
            )
            .await;
        assert!(res.status().is_success(), "seed_service failed: {:?}", res.status());
        let body = parse_body(res).await;
        body["id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The next date with the given weekday, at least `min_days_ahead` days
/// out (keeps tests inside the booking horizon but away from "today").
pub fn next_weekday(weekday: chrono::Weekday, min_days_ahead: i64) -> chrono::NaiveDate {
    let mut date = chrono::Local::now().date_naive() + chrono::TimeDelta::days(min_days_ahead);
    while date.weekday() != weekday {
        date += chrono::TimeDelta::days(1);
    }
    date
}
