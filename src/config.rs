use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub admin_api_key: String,
    pub notify_service_url: String,
    pub notify_service_token: String,
    pub calendar_sync_url: String,
    pub calendar_sync_token: String,
    pub filler_enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            admin_api_key: env::var("ADMIN_API_KEY").expect("ADMIN_API_KEY must be set"),
            notify_service_url: env::var("NOTIFY_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/notify".to_string()),
            notify_service_token: env::var("NOTIFY_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            calendar_sync_url: env::var("CALENDAR_SYNC_URL").unwrap_or_else(|_| "http://localhost:8001/api/v1/events".to_string()),
            calendar_sync_token: env::var("CALENDAR_SYNC_TOKEN").unwrap_or_else(|_| "test-token-2".to_string()),
            filler_enabled: env::var("FILLER_ENABLED").map(|v| v == "1" || v == "true").unwrap_or(true),
        }
    }
}
