use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Local, TimeDelta};
use tracing::info;

use crate::api::dtos::requests::{
    BookingsQuery, CancelRequest, CreateBookingRequest, RescheduleRequest, UpdateStatusRequest,
};
use crate::api::dtos::responses::BookingView;
use crate::api::extractors::admin::AdminKey;
use crate::api::handlers::parse_date;
use crate::domain::models::booking::BookingStatus;
use crate::domain::services::booking_manager::CreateBooking;
use crate::domain::services::notifications::NotificationChannels;
use crate::domain::services::time::time_to_minutes;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let start_min = time_to_minutes(&payload.start_time)?;

    if payload.name.trim().is_empty() || payload.phone.trim().is_empty() {
        return Err(AppError::Validation("Name and phone are required".into()));
    }

    let settings = state.booking_settings().await?;
    let today = Local::now().date_naive();
    if date < today {
        return Err(AppError::Validation("Cannot book in the past".into()));
    }
    if date > today + TimeDelta::days(settings.booking_days_ahead) {
        return Err(AppError::Validation("Date is outside the booking horizon".into()));
    }

    let created = state
        .booking_manager
        .create(
            &settings,
            CreateBooking {
                service_id: payload.service_id,
                date,
                start_min,
                customer_name: payload.name,
                customer_phone: payload.phone,
                customer_email: payload.email,
                promo_code: payload.promo_code,
            },
            None,
        )
        .await?;

    info!("Booking confirmed: {} on {}", created.id, created.date);
    Ok(Json(BookingView::from(created)))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Query(query): Query<BookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();
    let from = match &query.from {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let to = match &query.to {
        Some(s) => parse_date(s)?,
        None => from + TimeDelta::days(31),
    };
    let status = query
        .status
        .as_deref()
        .map(|s| {
            BookingStatus::parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", s)))
        })
        .transpose()?;

    let bookings = state.booking_repo.list_by_range(from, to, status).await?;
    Ok(Json(bookings.into_iter().map(BookingView::from).collect::<Vec<_>>()))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    Ok(Json(BookingView::from(booking)))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = BookingStatus::parse(&payload.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", payload.status)))?;

    let updated = state.booking_manager.update_status(&booking_id, status).await?;
    Ok(Json(BookingView::from(updated)))
}

pub async fn reschedule_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(booking_id): Path<String>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let start_min = time_to_minutes(&payload.start_time)?;
    let settings = state.booking_settings().await?;

    let updated = state
        .booking_manager
        .reschedule(&settings, &booking_id, date, start_min, payload.service_id.as_deref())
        .await?;
    Ok(Json(BookingView::from(updated)))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(booking_id): Path<String>,
    Json(payload): Json<CancelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state
        .booking_manager
        .cancel(
            &booking_id,
            NotificationChannels { email: payload.notify_email, sms: payload.notify_sms },
        )
        .await?;
    Ok(Json(BookingView::from(cancelled)))
}
