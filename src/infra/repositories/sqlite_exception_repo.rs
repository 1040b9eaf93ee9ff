use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::domain::models::schedule_exception::{
    ExceptionKind, ExceptionScope, ScheduleException,
};
use crate::domain::ports::ScheduleExceptionRepository;
use crate::error::AppError;

pub struct SqliteExceptionRepo {
    pool: SqlitePool,
}

impl SqliteExceptionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Flat row shape; the tagged scope only exists in the domain model, so a
/// row that mixes range and recurring columns fails to decode instead of
/// silently coexisting.
#[derive(FromRow)]
struct ExceptionRow {
    id: String,
    date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    day_of_week: Option<i32>,
    start_min: i32,
    end_min: i32,
    exception_type: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ExceptionRow> for ScheduleException {
    type Error = AppError;

    fn try_from(row: ExceptionRow) -> Result<Self, AppError> {
        let scope = match (row.date, row.end_date, row.day_of_week) {
            (Some(date), None, None) => ExceptionScope::OneOff { date },
            (Some(start), Some(end), None) => ExceptionScope::Range { start, end },
            (None, None, Some(w)) if (0..=6).contains(&w) => {
                ExceptionScope::Recurring { weekday: w as u8 }
            }
            _ => {
                return Err(AppError::InternalWithMsg(format!(
                    "schedule exception {} has conflicting scope columns",
                    row.id
                )))
            }
        };
        let kind = ExceptionKind::parse(&row.exception_type).ok_or_else(|| {
            AppError::InternalWithMsg(format!(
                "schedule exception {} has unknown type {}",
                row.id, row.exception_type
            ))
        })?;

        Ok(ScheduleException {
            id: row.id,
            scope,
            kind,
            start_min: row.start_min,
            end_min: row.end_min,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

fn scope_columns(scope: &ExceptionScope) -> (Option<NaiveDate>, Option<NaiveDate>, Option<i32>) {
    match *scope {
        ExceptionScope::OneOff { date } => (Some(date), None, None),
        ExceptionScope::Range { start, end } => (Some(start), Some(end), None),
        ExceptionScope::Recurring { weekday } => (None, None, Some(weekday as i32)),
    }
}

#[async_trait]
impl ScheduleExceptionRepository for SqliteExceptionRepo {
    async fn create(&self, exception: &ScheduleException) -> Result<ScheduleException, AppError> {
        let (date, end_date, day_of_week) = scope_columns(&exception.scope);
        let row = sqlx::query_as::<_, ExceptionRow>(
            "INSERT INTO schedule_exceptions (id, date, end_date, day_of_week, start_min, end_min, exception_type, description, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&exception.id)
        .bind(date)
        .bind(end_date)
        .bind(day_of_week)
        .bind(exception.start_min)
        .bind(exception.end_min)
        .bind(exception.kind.as_str())
        .bind(&exception.description)
        .bind(exception.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;
        row.try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ScheduleException>, AppError> {
        let row = sqlx::query_as::<_, ExceptionRow>("SELECT * FROM schedule_exceptions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self) -> Result<Vec<ScheduleException>, AppError> {
        let rows = sqlx::query_as::<_, ExceptionRow>(
            "SELECT * FROM schedule_exceptions ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(&self, exception: &ScheduleException) -> Result<ScheduleException, AppError> {
        let (date, end_date, day_of_week) = scope_columns(&exception.scope);
        let row = sqlx::query_as::<_, ExceptionRow>(
            "UPDATE schedule_exceptions SET date = ?, end_date = ?, day_of_week = ?, start_min = ?, end_min = ?, exception_type = ?, description = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(date)
        .bind(end_date)
        .bind(day_of_week)
        .bind(exception.start_min)
        .bind(exception.end_min)
        .bind(exception.kind.as_str())
        .bind(&exception.description)
        .bind(&exception.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;
        row.try_into()
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedule_exceptions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Schedule exception not found".into()));
        }
        Ok(())
    }
}
