use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::ports::BookingRepository;
use crate::error::AppError;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_checked(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let overlap = sqlx::query(
            "SELECT COUNT(*) as count FROM bookings
             WHERE date = ? AND status IN ('pending', 'confirmed')
               AND start_min < ? AND end_min > ?",
        )
        .bind(booking.date)
        .bind(booking.end_min)
        .bind(booking.start_min)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .get::<i64, _>("count");

        if overlap > 0 {
            return Err(AppError::SlotUnavailable);
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, service_id, date, start_min, end_min, customer_name, customer_phone, customer_email, promo_code, status, is_system, system_action_day, calendar_event_id, manage_token, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&booking.id)
        .bind(&booking.service_id)
        .bind(booking.date)
        .bind(booking.start_min)
        .bind(booking.end_min)
        .bind(&booking.customer_name)
        .bind(&booking.customer_phone)
        .bind(&booking.customer_email)
        .bind(&booking.promo_code)
        .bind(booking.status)
        .bind(booking.is_system)
        .bind(booking.system_action_day)
        .bind(&booking.calendar_event_id)
        .bind(&booking.manage_token)
        .bind(booking.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn reschedule_checked(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let overlap = sqlx::query(
            "SELECT COUNT(*) as count FROM bookings
             WHERE date = ? AND id != ? AND status IN ('pending', 'confirmed')
               AND start_min < ? AND end_min > ?",
        )
        .bind(booking.date)
        .bind(&booking.id)
        .bind(booking.end_min)
        .bind(booking.start_min)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .get::<i64, _>("count");

        if overlap > 0 {
            return Err(AppError::SlotUnavailable);
        }

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET service_id = ?, date = ?, start_min = ?, end_min = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&booking.service_id)
        .bind(booking.date)
        .bind(booking.start_min)
        .bind(booking.end_min)
        .bind(&booking.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE manage_token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE date = ? ORDER BY start_min ASC",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, AppError> {
        match status {
            Some(status) => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE date >= ? AND date <= ? AND status = ?
                 ORDER BY date ASC, start_min ASC",
            )
            .bind(from)
            .bind(to)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
            None => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE date >= ? AND date <= ?
                 ORDER BY date ASC, start_min ASC",
            )
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
        }
    }

    async fn list_system_by_date(
        &self,
        date: NaiveDate,
        action_day: Option<i32>,
    ) -> Result<Vec<Booking>, AppError> {
        match action_day {
            Some(day) => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE date = ? AND is_system = 1 AND system_action_day = ?
                 ORDER BY start_min ASC",
            )
            .bind(date)
            .bind(day)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
            None => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE date = ? AND is_system = 1 ORDER BY start_min ASC",
            )
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
        }
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET service_id = ?, date = ?, start_min = ?, end_min = ?,
                 customer_name = ?, customer_phone = ?, customer_email = ?, promo_code = ?,
                 system_action_day = ?, calendar_event_id = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&booking.service_id)
        .bind(booking.date)
        .bind(booking.start_min)
        .bind(booking.end_min)
        .bind(&booking.customer_name)
        .bind(&booking.customer_phone)
        .bind(&booking.customer_email)
        .bind(&booking.promo_code)
        .bind(booking.system_action_day)
        .bind(&booking.calendar_event_id)
        .bind(&booking.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = ? WHERE id = ? RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
