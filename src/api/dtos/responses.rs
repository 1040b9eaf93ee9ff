use serde::Serialize;

use crate::domain::models::booking::Booking;
use crate::domain::services::availability::Slot;
use crate::domain::services::time::minutes_to_time;

#[derive(Serialize)]
pub struct SlotView {
    pub start_time: String,
    pub end_time: String,
}

impl From<Slot> for SlotView {
    fn from(slot: Slot) -> Self {
        Self {
            start_time: minutes_to_time(slot.start_min).unwrap_or_default(),
            end_time: minutes_to_time(slot.end_min).unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    pub slots: Vec<SlotView>,
}

#[derive(Serialize)]
pub struct BookingView {
    pub id: String,
    pub service_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub promo_code: Option<String>,
    pub is_system: bool,
    pub manage_token: String,
}

impl From<Booking> for BookingView {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            service_id: b.service_id,
            date: b.date.format("%Y-%m-%d").to_string(),
            start_time: minutes_to_time(b.start_min).unwrap_or_default(),
            end_time: minutes_to_time(b.end_min).unwrap_or_default(),
            status: b.status.as_str().to_string(),
            customer_name: b.customer_name,
            customer_phone: b.customer_phone,
            customer_email: b.customer_email,
            promo_code: b.promo_code,
            is_system: b.is_system,
            manage_token: b.manage_token,
        }
    }
}

#[derive(Serialize)]
pub struct ManageView {
    pub booking: BookingView,
    pub can_modify: bool,
}
