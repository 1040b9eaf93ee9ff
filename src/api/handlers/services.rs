use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::api::dtos::requests::{CreateServiceRequest, UpdateServiceRequest};
use crate::api::extractors::admin::AdminKey;
use crate::domain::models::service::{NewServiceParams, Service};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list_active().await?;
    Ok(Json(services))
}

pub async fn list_all_services(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list_all().await?;
    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.duration_min <= 0 {
        return Err(AppError::InvalidServiceDuration);
    }
    if payload.preparation_min < 0 {
        return Err(AppError::Validation("Preparation time cannot be negative".into()));
    }

    let service = Service::new(NewServiceParams {
        name: payload.name,
        duration_min: payload.duration_min,
        preparation_min: payload.preparation_min,
        price_cents: payload.price_cents,
        sort_order: payload.sort_order,
    });
    let created = state.service_repo.create(&service).await?;
    Ok(Json(created))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(service_id): Path<String>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.duration_min <= 0 {
        return Err(AppError::InvalidServiceDuration);
    }

    let mut service = state
        .service_repo
        .find_by_id(&service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

    service.name = payload.name;
    service.duration_min = payload.duration_min;
    service.preparation_min = payload.preparation_min;
    service.price_cents = payload.price_cents;
    service.is_active = payload.is_active;
    service.sort_order = payload.sort_order;

    let updated = state.service_repo.update(&service).await?;
    Ok(Json(updated))
}

/// Services referenced by bookings are never hard-deleted; deactivation
/// hides them from the public listing and the slot engine.
pub async fn deactivate_service(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(service_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut service = state
        .service_repo
        .find_by_id(&service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

    service.is_active = false;
    let updated = state.service_repo.update(&service).await?;
    Ok(Json(updated))
}
