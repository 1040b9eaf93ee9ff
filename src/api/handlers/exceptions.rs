use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::api::dtos::requests::ExceptionRequest;
use crate::api::extractors::admin::AdminKey;
use crate::api::handlers::parse_date;
use crate::domain::models::schedule_exception::{ExceptionKind, ScheduleException};
use crate::domain::services::time::time_to_minutes;
use crate::error::AppError;
use crate::state::AppState;

/// A request may name exactly one scope: a single date, a date range, or
/// a recurring weekday. Mixing the range and recurring shapes is rejected
/// here rather than normalized away.
fn build_exception(payload: ExceptionRequest) -> Result<ScheduleException, AppError> {
    let kind = ExceptionKind::parse(&payload.exception_type)
        .ok_or_else(|| AppError::Validation(format!("Unknown exception type: {}", payload.exception_type)))?;
    let start_min = time_to_minutes(&payload.start_time)?;
    let end_min = time_to_minutes(&payload.end_time)?;

    match (&payload.date, &payload.end_date, payload.day_of_week) {
        (Some(_), _, Some(_)) | (_, Some(_), Some(_)) => Err(AppError::Validation(
            "An exception cannot be both dated and recurring".into(),
        )),
        (Some(date), Some(end_date), None) => ScheduleException::range(
            parse_date(date)?,
            parse_date(end_date)?,
            kind,
            start_min,
            end_min,
            payload.description,
        ),
        (Some(date), None, None) => {
            ScheduleException::one_off(parse_date(date)?, kind, start_min, end_min, payload.description)
        }
        (None, None, Some(weekday)) => {
            ScheduleException::recurring(weekday, kind, start_min, end_min, payload.description)
        }
        (None, Some(_), None) => Err(AppError::Validation(
            "A range exception needs a start date".into(),
        )),
        (None, None, None) => Err(AppError::Validation(
            "An exception needs a date, a date range or a weekday".into(),
        )),
    }
}

pub async fn list_exceptions(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
) -> Result<impl IntoResponse, AppError> {
    let exceptions = state.exception_repo.list().await?;
    Ok(Json(exceptions))
}

pub async fn create_exception(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Json(payload): Json<ExceptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exception = build_exception(payload)?;
    let created = state.exception_repo.create(&exception).await?;
    Ok(Json(created))
}

pub async fn update_exception(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(exception_id): Path<String>,
    Json(payload): Json<ExceptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let existing = state
        .exception_repo
        .find_by_id(&exception_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Schedule exception not found".into()))?;

    let mut replacement = build_exception(payload)?;
    replacement.id = existing.id;
    replacement.created_at = existing.created_at;

    let updated = state.exception_repo.update(&replacement).await?;
    Ok(Json(updated))
}

pub async fn delete_exception(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(exception_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.exception_repo.delete(&exception_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
