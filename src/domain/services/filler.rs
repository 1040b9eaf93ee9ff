use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::models::booking::Booking;
use crate::domain::models::service::Service;
use crate::domain::models::settings::BookingSettings;
use crate::domain::ports::{BookingRepository, ServiceRepository};
use crate::domain::services::availability::{available_slots, Slot};
use crate::domain::services::booking_manager::{BookingManager, CreateBooking};
use crate::domain::services::notifications::NotificationChannels;
use crate::error::AppError;

/// The filler searches on a finer grid than the public listing.
pub const FILLER_STEP_MIN: i32 = 15;

const PLACEHOLDER_NAME: &str = "Walk-in";
const PLACEHOLDER_PHONE: &str = "system";

#[derive(Debug, Default, Serialize)]
pub struct FillerReport {
    pub created: u32,
    pub cancelled: u32,
    pub rescheduled: u32,
    pub skipped: u32,
}

/// Uniform pick over the union of available starts across all services,
/// then uniform over the services open at that start. Pure over the
/// injected random source so runs are reproducible in tests.
pub fn pick_slot_and_service<R: Rng>(
    rng: &mut R,
    per_service: &[(Service, Vec<Slot>)],
) -> Option<(Service, Slot)> {
    let mut starts: Vec<i32> = per_service
        .iter()
        .flat_map(|(_, slots)| slots.iter().map(|s| s.start_min))
        .collect();
    starts.sort_unstable();
    starts.dedup();
    if starts.is_empty() {
        return None;
    }

    let start = starts[rng.gen_range(0..starts.len())];
    let eligible: Vec<(&Service, &Slot)> = per_service
        .iter()
        .filter_map(|(service, slots)| {
            slots
                .iter()
                .find(|s| s.start_min == start)
                .map(|slot| (service, slot))
        })
        .collect();

    let (service, slot) = eligible[rng.gen_range(0..eligible.len())];
    Some((service.clone(), *slot))
}

/// Maintains synthetic bookings over a 4-day rolling window so the public
/// calendar never looks empty. Each day/offset action is independently
/// idempotent and routed through the same slot generator and lifecycle
/// manager an admin client would use.
pub struct FillerScheduler {
    manager: Arc<BookingManager>,
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn ServiceRepository>,
}

impl FillerScheduler {
    pub fn new(
        manager: Arc<BookingManager>,
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn ServiceRepository>,
    ) -> Self {
        Self { manager, bookings, services }
    }

    pub async fn run<R: Rng + Send>(
        &self,
        settings: &BookingSettings,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<FillerReport, AppError> {
        let mut report = FillerReport::default();

        for offset in 1..=4i64 {
            let date = today + TimeDelta::days(offset);
            match offset {
                4 => self.ensure_tagged(settings, date, 4, 1, rng, &mut report).await?,
                3 => self.ensure_tagged(settings, date, 3, 2, rng, &mut report).await?,
                2 => self.shuffle_day(settings, date, rng, &mut report).await?,
                1 => self.ensure_tagged(settings, date, 1, 1, rng, &mut report).await?,
                _ => unreachable!(),
            }
        }

        info!(
            "Filler run for {}: created {}, cancelled {}, rescheduled {}, skipped {}",
            today, report.created, report.cancelled, report.rescheduled, report.skipped
        );
        Ok(report)
    }

    /// Candidate (service, slots) pairs for a date on the filler grid.
    async fn candidates(
        &self,
        settings: &BookingSettings,
        date: NaiveDate,
        exclude_booking: Option<&str>,
    ) -> Result<Vec<(Service, Vec<Slot>)>, AppError> {
        let (occupied, exceptions) = self.manager.day_context(date, exclude_booking).await?;
        let mut out = Vec::new();
        for service in self.services.list_active().await? {
            let slots = available_slots(
                settings,
                service.duration_min,
                FILLER_STEP_MIN,
                date,
                &occupied,
                &exceptions,
            )?;
            out.push((service, slots));
        }
        Ok(out)
    }

    /// Tops the date up to `target` bookings tagged with `action_day`,
    /// creating only the shortfall. Counting tagged rows regardless of
    /// status is what makes repeated runs within a day no-ops.
    async fn ensure_tagged<R: Rng + Send>(
        &self,
        settings: &BookingSettings,
        date: NaiveDate,
        action_day: i32,
        target: usize,
        rng: &mut R,
        report: &mut FillerReport,
    ) -> Result<(), AppError> {
        let existing = self.bookings.list_system_by_date(date, Some(action_day)).await?.len();
        if existing >= target {
            debug!("Filler day {} offset {}: already satisfied", date, action_day);
            return Ok(());
        }

        for _ in existing..target {
            let per_service = self.candidates(settings, date, None).await?;
            let Some((service, slot)) = pick_slot_and_service(rng, &per_service) else {
                report.skipped += 1;
                continue;
            };

            self.manager
                .create(
                    settings,
                    CreateBooking {
                        service_id: service.id,
                        date,
                        start_min: slot.start_min,
                        customer_name: PLACEHOLDER_NAME.into(),
                        customer_phone: PLACEHOLDER_PHONE.into(),
                        customer_email: None,
                        promo_code: None,
                    },
                    Some(action_day),
                )
                .await?;
            report.created += 1;
        }
        Ok(())
    }

    /// Offset 2: once per date, either cancel one synthetic booking or move
    /// one to a different free slot (possibly changing the service). The
    /// touched booking is retagged so a second run the same day skips.
    async fn shuffle_day<R: Rng + Send>(
        &self,
        settings: &BookingSettings,
        date: NaiveDate,
        rng: &mut R,
        report: &mut FillerReport,
    ) -> Result<(), AppError> {
        if !self.bookings.list_system_by_date(date, Some(2)).await?.is_empty() {
            debug!("Filler day {}: shuffle already applied", date);
            return Ok(());
        }

        let active: Vec<Booking> = self
            .bookings
            .list_system_by_date(date, None)
            .await?
            .into_iter()
            .filter(|b| b.status.occupies_slot())
            .collect();
        if active.is_empty() {
            report.skipped += 1;
            return Ok(());
        }

        let victim = active[rng.gen_range(0..active.len())].clone();

        if rng.gen_bool(0.5) {
            self.retag(&victim.id, 2).await?;
            self.manager
                .cancel(&victim.id, NotificationChannels { email: false, sms: false })
                .await?;
            report.cancelled += 1;
        } else {
            let per_service = self.candidates(settings, date, Some(&victim.id)).await?;
            let filtered: Vec<(Service, Vec<Slot>)> = per_service
                .into_iter()
                .map(|(service, slots)| {
                    let slots = slots
                        .into_iter()
                        .filter(|s| s.start_min != victim.start_min)
                        .collect();
                    (service, slots)
                })
                .collect();

            let Some((service, slot)) = pick_slot_and_service(rng, &filtered) else {
                report.skipped += 1;
                return Ok(());
            };

            self.manager
                .reschedule(settings, &victim.id, date, slot.start_min, Some(&service.id))
                .await?;
            self.retag(&victim.id, 2).await?;
            report.rescheduled += 1;
        }
        Ok(())
    }

    async fn retag(&self, booking_id: &str, action_day: i32) -> Result<(), AppError> {
        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
        booking.system_action_day = Some(action_day);
        self.bookings.update(&booking).await?;
        Ok(())
    }
}
