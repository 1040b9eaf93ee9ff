use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::services::time::time_to_minutes;
use crate::error::AppError;

/// Scheduling configuration, materialized once from the key-value settings
/// store and passed into the engine rather than re-fetched per call.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BookingSettings {
    pub work_start_min: i32,
    pub work_end_min: i32,
    pub break_between_min: i32,
    pub booking_days_ahead: i64,
    pub cancel_hours_before: i64,
    pub slot_step_min: i32,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            work_start_min: 9 * 60,
            work_end_min: 18 * 60,
            break_between_min: 15,
            booking_days_ahead: 30,
            cancel_hours_before: 24,
            slot_step_min: 30,
        }
    }
}

impl BookingSettings {
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let minutes = |key: &str, fallback: i32| -> Result<i32, AppError> {
            match map.get(key) {
                Some(v) => time_to_minutes(v),
                None => Ok(fallback),
            }
        };
        let number = |key: &str, fallback: i64| -> Result<i64, AppError> {
            match map.get(key) {
                Some(v) => v
                    .parse()
                    .map_err(|_| AppError::InvalidFormat(format!("setting {}: {}", key, v))),
                None => Ok(fallback),
            }
        };

        let settings = Self {
            work_start_min: minutes("work_start", defaults.work_start_min)?,
            work_end_min: minutes("work_end", defaults.work_end_min)?,
            break_between_min: number("break_between", defaults.break_between_min as i64)? as i32,
            booking_days_ahead: number("booking_days_ahead", defaults.booking_days_ahead)?,
            cancel_hours_before: number("cancel_hours_before", defaults.cancel_hours_before)?,
            slot_step_min: number("slot_step", defaults.slot_step_min as i64)? as i32,
        };

        if settings.work_start_min >= settings.work_end_min {
            return Err(AppError::Validation("work_start must precede work_end".into()));
        }
        if settings.break_between_min < 0 || settings.slot_step_min <= 0 {
            return Err(AppError::Validation("break_between and slot_step must be sane".into()));
        }
        Ok(settings)
    }
}
