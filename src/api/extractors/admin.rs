use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::error::AppError;
use crate::state::AppState;

/// Gate for the admin surface. Session handling lives outside this
/// service; a single static key stands in for the excluded auth layer.
pub struct AdminKey;

impl FromRequestParts<Arc<AppState>> for AdminKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get("x-admin-key")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        if provided == state.config.admin_api_key {
            Ok(AdminKey)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
