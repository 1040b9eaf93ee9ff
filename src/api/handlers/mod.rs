use chrono::NaiveDate;

use crate::error::AppError;

pub mod availability;
pub mod booking;
pub mod clients;
pub mod exceptions;
pub mod filler;
pub mod health;
pub mod manage;
pub mod services;
pub mod settings;
pub mod templates;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidFormat(format!("date: {}", s)))
}
