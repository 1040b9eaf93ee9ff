use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKind {
    Block,
    Allow,
}

impl ExceptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExceptionKind::Block => "block",
            ExceptionKind::Allow => "allow",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "block" => Some(ExceptionKind::Block),
            "allow" => Some(ExceptionKind::Allow),
            _ => None,
        }
    }
}

/// Which dates an exception touches. The three shapes are mutually
/// exclusive; in particular a date range can never also be recurring.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ExceptionScope {
    OneOff { date: NaiveDate },
    Recurring { weekday: u8 },
    Range { start: NaiveDate, end: NaiveDate },
}

impl ExceptionScope {
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match *self {
            ExceptionScope::OneOff { date: d } => d == date,
            ExceptionScope::Recurring { weekday } => {
                weekday_index(date.weekday()) == weekday
            }
            ExceptionScope::Range { start, end } => start <= date && date <= end,
        }
    }
}

/// 0 = Sunday .. 6 = Saturday, matching the stored `day_of_week` column.
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleException {
    pub id: String,
    pub scope: ExceptionScope,
    pub kind: ExceptionKind,
    pub start_min: i32,
    pub end_min: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ScheduleException {
    fn build(
        scope: ExceptionScope,
        kind: ExceptionKind,
        start_min: i32,
        end_min: i32,
        description: Option<String>,
    ) -> Result<Self, AppError> {
        if !(0..1440).contains(&start_min) || !(0..1440).contains(&end_min) {
            return Err(AppError::Validation(
                "Exception interval must lie within a single day".into(),
            ));
        }
        if start_min >= end_min {
            return Err(AppError::Validation(
                "Exception interval must end after it starts".into(),
            ));
        }
        if let ExceptionScope::Range { start, end } = scope {
            if end < start {
                return Err(AppError::Validation(
                    "Exception range must end on or after its start date".into(),
                ));
            }
        }
        if let ExceptionScope::Recurring { weekday } = scope {
            if weekday > 6 {
                return Err(AppError::Validation(
                    "Weekday must be between 0 (Sunday) and 6 (Saturday)".into(),
                ));
            }
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            scope,
            kind,
            start_min,
            end_min,
            description,
            created_at: Utc::now(),
        })
    }

    pub fn one_off(
        date: NaiveDate,
        kind: ExceptionKind,
        start_min: i32,
        end_min: i32,
        description: Option<String>,
    ) -> Result<Self, AppError> {
        Self::build(ExceptionScope::OneOff { date }, kind, start_min, end_min, description)
    }

    pub fn recurring(
        weekday: u8,
        kind: ExceptionKind,
        start_min: i32,
        end_min: i32,
        description: Option<String>,
    ) -> Result<Self, AppError> {
        Self::build(ExceptionScope::Recurring { weekday }, kind, start_min, end_min, description)
    }

    pub fn range(
        start: NaiveDate,
        end: NaiveDate,
        kind: ExceptionKind,
        start_min: i32,
        end_min: i32,
        description: Option<String>,
    ) -> Result<Self, AppError> {
        Self::build(ExceptionScope::Range { start, end }, kind, start_min, end_min, description)
    }
}
