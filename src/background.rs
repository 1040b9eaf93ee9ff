use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use rand::{rngs::StdRng, SeedableRng};
use tokio::time::sleep;
use tracing::{error, info};

use crate::state::AppState;

/// Drives the filler once per local day. The pass itself is idempotent
/// per day/offset, so waking up early or being restarted is harmless.
pub async fn start_filler_worker(state: Arc<AppState>) {
    if !state.config.filler_enabled {
        info!("Filler worker disabled by configuration");
        return;
    }
    info!("Starting filler worker...");

    let mut last_run: Option<NaiveDate> = None;
    loop {
        let today = Local::now().date_naive();
        if last_run != Some(today) {
            match run_once(&state, today).await {
                Ok(()) => last_run = Some(today),
                Err(e) => error!("Filler run failed: {}", e),
            }
        }
        sleep(Duration::from_secs(3600)).await;
    }
}

async fn run_once(state: &Arc<AppState>, today: NaiveDate) -> Result<(), crate::error::AppError> {
    let settings = state.booking_settings().await?;
    let mut rng = StdRng::from_entropy();
    let report = state.filler.run(&settings, today, &mut rng).await?;
    info!(
        "Filler pass done: created {}, cancelled {}, rescheduled {}, skipped {}",
        report.created, report.cancelled, report.rescheduled, report.skipped
    );
    Ok(())
}
