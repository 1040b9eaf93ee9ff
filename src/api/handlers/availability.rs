use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Local, TimeDelta};
use serde_json::json;

use crate::api::dtos::requests::{AvailabilityQuery, AvailableDatesQuery};
use crate::api::dtos::responses::{AvailabilityResponse, SlotView};
use crate::api::handlers::parse_date;
use crate::domain::services::availability::available_slots;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&query.date)?;
    let settings = state.booking_settings().await?;

    let today = Local::now().date_naive();
    if date < today || date > today + TimeDelta::days(settings.booking_days_ahead) {
        return Err(AppError::Validation("Date is outside the booking horizon".into()));
    }

    let service = state
        .service_repo
        .find_by_id(&query.service_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

    let (occupied, exceptions) = state.booking_manager.day_context(date, None).await?;
    let slots = available_slots(
        &settings,
        service.duration_min,
        settings.slot_step_min,
        date,
        &occupied,
        &exceptions,
    )?;

    Ok(Json(AvailabilityResponse {
        date: query.date,
        slots: slots.into_iter().map(SlotView::from).collect(),
    }))
}

/// Dates within the booking horizon that still have at least one open
/// slot for the service.
pub async fn list_dates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableDatesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.booking_settings().await?;
    let service = state
        .service_repo
        .find_by_id(&query.service_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

    let today = Local::now().date_naive();
    let mut dates = Vec::new();

    for offset in 1..=settings.booking_days_ahead {
        let date = today + TimeDelta::days(offset);
        let (occupied, exceptions) = state.booking_manager.day_context(date, None).await?;
        let slots = available_slots(
            &settings,
            service.duration_min,
            settings.slot_step_min,
            date,
            &occupied,
            &exceptions,
        )?;
        if !slots.is_empty() {
            dates.push(date.format("%Y-%m-%d").to_string());
        }
    }

    Ok(Json(json!({ "dates": dates })))
}
