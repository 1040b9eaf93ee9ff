use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::api::dtos::requests::UpdateClientRequest;
use crate::api::extractors::admin::AdminKey;
use crate::domain::models::client::Client;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
) -> Result<impl IntoResponse, AppError> {
    let clients = state.client_repo.list().await?;
    Ok(Json(clients))
}

pub async fn get_client(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(phone): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let client = state
        .client_repo
        .find_by_phone(&phone)
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found".into()))?;
    Ok(Json(client))
}

/// Manual blacklist toggle; creates the client row on first use so a
/// number can be blocked before it ever books.
pub async fn update_client(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(phone): Path<String>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut client = match state.client_repo.find_by_phone(&phone).await? {
        Some(c) => c,
        None => {
            let fresh = Client::new(phone.clone(), payload.name.clone(), payload.email.clone());
            state.client_repo.create(&fresh).await?
        }
    };

    client.name = payload.name.or(client.name);
    client.email = payload.email.or(client.email);
    client.is_blacklisted = payload.is_blacklisted;
    client.blacklist_reason = if payload.is_blacklisted {
        payload.blacklist_reason.or(client.blacklist_reason)
    } else {
        None
    };

    let updated = state.client_repo.update(&client).await?;
    Ok(Json(updated))
}
