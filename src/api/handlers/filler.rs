use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Local;
use rand::{rngs::StdRng, SeedableRng};

use crate::api::dtos::requests::FillerRunRequest;
use crate::api::extractors::admin::AdminKey;
use crate::api::handlers::parse_date;
use crate::error::AppError;
use crate::state::AppState;

/// Manual trigger for the filler pass. `date` overrides "today" and
/// `seed` pins the random source, which is how the tests drive it.
pub async fn run_filler(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Json(payload): Json<FillerRunRequest>,
) -> Result<impl IntoResponse, AppError> {
    let today = match &payload.date {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let mut rng = match payload.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let settings = state.booking_settings().await?;
    let report = state.filler.run(&settings, today, &mut rng).await?;
    Ok(Json(report))
}
