use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::api::dtos::requests::TemplateRequest;
use crate::api::extractors::admin::AdminKey;
use crate::domain::models::template::MessageTemplate;
use crate::error::AppError;
use crate::state::AppState;

const KINDS: &[&str] = &["booking_created", "booking_cancelled", "blacklist_warning"];
const CHANNELS: &[&str] = &["email", "sms"];

fn validate(payload: &TemplateRequest) -> Result<(), AppError> {
    if !KINDS.contains(&payload.kind.as_str()) {
        return Err(AppError::Validation(format!("Unknown template kind: {}", payload.kind)));
    }
    if !CHANNELS.contains(&payload.channel.as_str()) {
        return Err(AppError::Validation(format!("Unknown channel: {}", payload.channel)));
    }
    Ok(())
}

pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
) -> Result<impl IntoResponse, AppError> {
    let templates = state.template_repo.list().await?;
    Ok(Json(templates))
}

pub async fn create_template(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Json(payload): Json<TemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let template =
        MessageTemplate::new(payload.kind, payload.channel, payload.subject, payload.body);
    let created = state.template_repo.create(&template).await?;
    Ok(Json(created))
}

pub async fn update_template(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(template_id): Path<String>,
    Json(payload): Json<TemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate(&payload)?;
    let mut template = state
        .template_repo
        .find_by_id(&template_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".into()))?;

    template.kind = payload.kind;
    template.channel = payload.channel;
    template.subject = payload.subject;
    template.body = payload.body;
    template.updated_at = Utc::now();

    let updated = state.template_repo.update(&template).await?;
    Ok(Json(updated))
}

pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.template_repo.delete(&template_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
