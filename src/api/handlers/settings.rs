use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::api::dtos::requests::UpdateSettingsRequest;
use crate::api::extractors::admin::AdminKey;
use crate::domain::models::settings::BookingSettings;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
) -> Result<impl IntoResponse, AppError> {
    let map = state.settings_repo.get_all().await?;
    Ok(Json(map))
}

/// Values are validated as a whole (merged over the current map) before
/// any row is written, so a bad update cannot leave settings half-applied.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut merged = state.settings_repo.get_all().await?;
    for (key, value) in &payload.values {
        merged.insert(key.clone(), value.clone());
    }
    BookingSettings::from_map(&merged)?;

    for (key, value) in &payload.values {
        state.settings_repo.set(key, value).await?;
    }
    Ok(Json(merged))
}
