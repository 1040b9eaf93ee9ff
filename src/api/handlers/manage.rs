use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Local;
use tracing::info;

use crate::api::dtos::responses::{BookingView, ManageView};
use crate::error::AppError;
use crate::state::AppState;

/// Customer self-service lookup by opaque manage token; no authentication.
pub async fn get_booking_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.booking_settings().await?;
    let now = Local::now().naive_local();

    let (booking, can_modify) = state.booking_manager.manage_lookup(&settings, &token, now).await?;
    Ok(Json(ManageView { booking: BookingView::from(booking), can_modify }))
}

pub async fn cancel_booking_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.booking_settings().await?;
    let now = Local::now().naive_local();

    let cancelled = state.booking_manager.self_service_cancel(&settings, &token, now).await?;
    info!("Booking cancelled via manage token: {}", cancelled.id);
    Ok(Json(BookingView::from(cancelled)))
}
