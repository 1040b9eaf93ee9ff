use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::domain::models::booking::Booking;
use crate::domain::models::schedule_exception::ExceptionKind;
use crate::domain::models::service::Service;
use crate::domain::models::settings::BookingSettings;
use crate::domain::services::exceptions::ExceptionInterval;
use crate::domain::services::time::intervals_overlap;
use crate::error::AppError;

/// A candidate bookable window on a given date.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Slot {
    pub start_min: i32,
    pub end_min: i32,
}

/// The span an existing booking reserves, preparation time included.
/// The configured break is added on top by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedInterval {
    pub start_min: i32,
    pub end_min: i32,
}

/// Projects pending/confirmed bookings onto occupied intervals, padding
/// each end with the service's preparation time. Bookings whose service
/// cannot be resolved fall back to the bare interval.
pub fn occupied_intervals(bookings: &[Booking], services: &[Service]) -> Vec<OccupiedInterval> {
    let mut occupied: Vec<OccupiedInterval> = bookings
        .iter()
        .filter(|b| b.status.occupies_slot())
        .map(|b| {
            let prep = services
                .iter()
                .find(|s| s.id == b.service_id)
                .map(|s| s.preparation_min)
                .unwrap_or(0);
            OccupiedInterval {
                start_min: b.start_min,
                end_min: b.end_min + prep,
            }
        })
        .collect();
    occupied.sort_by_key(|o| o.start_min);
    occupied
}

/// The open windows for a date. Allow exceptions, when present, fully
/// supersede the global working hours for that day; this is also how a
/// normally-closed Sunday gets opened.
fn open_windows(
    settings: &BookingSettings,
    date: NaiveDate,
    exceptions: &[ExceptionInterval],
) -> Vec<(i32, i32)> {
    let allows: Vec<(i32, i32)> = exceptions
        .iter()
        .filter(|e| e.kind == ExceptionKind::Allow)
        .map(|e| (e.start_min, e.end_min))
        .collect();

    if !allows.is_empty() {
        return allows;
    }
    if date.weekday() == Weekday::Sun {
        return Vec::new();
    }
    vec![(settings.work_start_min, settings.work_end_min)]
}

fn blocked(start_min: i32, end_min: i32, exceptions: &[ExceptionInterval]) -> bool {
    exceptions
        .iter()
        .filter(|e| e.kind == ExceptionKind::Block)
        .any(|e| intervals_overlap(start_min, end_min, e.start_min, e.end_min))
}

/// Enumerates bookable slots of `duration_min` minutes on `date`, stepping
/// `step_min` from each window start. A candidate is excluded when it
/// touches an occupied interval padded by the break, or a block exception
/// (exact boundaries, never padded). When a candidate collides with a
/// padded booking the cursor jumps to that interval's end, so the first
/// slot after a 10:00-11:00 booking with a 15-minute break is 11:15 even
/// though that is off the original grid.
pub fn available_slots(
    settings: &BookingSettings,
    duration_min: i32,
    step_min: i32,
    date: NaiveDate,
    occupied: &[OccupiedInterval],
    exceptions: &[ExceptionInterval],
) -> Result<Vec<Slot>, AppError> {
    if duration_min <= 0 {
        return Err(AppError::InvalidServiceDuration);
    }
    if step_min <= 0 {
        return Err(AppError::Validation("slot step must be positive".into()));
    }

    let brk = settings.break_between_min;
    let mut slots = Vec::new();

    for (win_start, win_end) in open_windows(settings, date, exceptions) {
        let mut cursor = win_start;
        while cursor + duration_min <= win_end {
            let end = cursor + duration_min;

            if let Some(hit) = occupied
                .iter()
                .find(|o| intervals_overlap(cursor, end, o.start_min, o.end_min + brk))
            {
                // Overlap guarantees the jump target is ahead of the cursor.
                cursor = hit.end_min + brk;
                continue;
            }
            if blocked(cursor, end, exceptions) {
                cursor += step_min;
                continue;
            }

            slots.push(Slot { start_min: cursor, end_min: end });
            cursor += step_min;
        }
    }

    slots.sort_by_key(|s| s.start_min);
    slots.dedup();
    Ok(slots)
}

/// Commit-time re-validation for an arbitrary start time: the same
/// exclusion rule the enumeration applies, without requiring grid
/// alignment (admins may book off-grid).
pub fn slot_is_free(
    settings: &BookingSettings,
    duration_min: i32,
    date: NaiveDate,
    start_min: i32,
    occupied: &[OccupiedInterval],
    exceptions: &[ExceptionInterval],
) -> Result<bool, AppError> {
    if duration_min <= 0 {
        return Err(AppError::InvalidServiceDuration);
    }
    let end = start_min + duration_min;
    let brk = settings.break_between_min;

    let in_window = open_windows(settings, date, exceptions)
        .iter()
        .any(|&(ws, we)| start_min >= ws && end <= we);
    if !in_window {
        return Ok(false);
    }
    if occupied
        .iter()
        .any(|o| intervals_overlap(start_min, end, o.start_min, o.end_min + brk))
    {
        return Ok(false);
    }
    Ok(!blocked(start_min, end, exceptions))
}
