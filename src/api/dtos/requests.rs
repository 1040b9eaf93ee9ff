use std::collections::HashMap;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub service_id: String,
    pub date: String,
    pub start_time: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub promo_code: Option<String>,
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub service_id: String,
    pub date: String,
}

#[derive(Deserialize)]
pub struct AvailableDatesQuery {
    pub service_id: String,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct RescheduleRequest {
    pub date: String,
    pub start_time: String,
    pub service_id: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Default)]
pub struct CancelRequest {
    #[serde(default = "default_true")]
    pub notify_email: bool,
    #[serde(default = "default_true")]
    pub notify_sms: bool,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub duration_min: i32,
    #[serde(default)]
    pub preparation_min: i32,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: String,
    pub duration_min: i32,
    pub preparation_min: i32,
    pub price_cents: i64,
    pub is_active: bool,
    pub sort_order: i32,
}

fn default_day_start() -> String {
    "00:00".to_string()
}

fn default_day_end() -> String {
    "23:59".to_string()
}

#[derive(Deserialize)]
pub struct ExceptionRequest {
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub day_of_week: Option<u8>,
    #[serde(default = "default_day_start")]
    pub start_time: String,
    #[serde(default = "default_day_end")]
    pub end_time: String,
    pub exception_type: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_blacklisted: bool,
    pub blacklist_reason: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(flatten)]
    pub values: HashMap<String, String>,
}

#[derive(Deserialize)]
pub struct TemplateRequest {
    pub kind: String,
    pub channel: String,
    pub subject: Option<String>,
    pub body: String,
}

#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct FillerRunRequest {
    pub date: Option<String>,
    pub seed: Option<u64>,
}
