use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tracing::{error, info};

use crate::domain::models::booking::{Booking, BookingStatus, NewBookingParams};
use crate::domain::models::client::Client;
use crate::domain::models::settings::BookingSettings;
use crate::domain::ports::{
    BookingRepository, CalendarAction, CalendarSync, ClientRepository,
    ScheduleExceptionRepository, ServiceRepository,
};
use crate::domain::services::availability::{occupied_intervals, slot_is_free, OccupiedInterval};
use crate::domain::services::exceptions::{effective_exceptions, ExceptionInterval};
use crate::domain::services::notifications::{NotificationChannels, NotificationKind, Notifier};
use crate::error::AppError;

pub struct CreateBooking {
    pub service_id: String,
    pub date: NaiveDate,
    pub start_min: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub promo_code: Option<String>,
}

/// All booking mutations flow through here: validate against the slot
/// generator's rule, commit through the repository's transactional guard,
/// then fan out fire-and-forget side effects.
pub struct BookingManager {
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn ServiceRepository>,
    clients: Arc<dyn ClientRepository>,
    exceptions: Arc<dyn ScheduleExceptionRepository>,
    notifier: Arc<Notifier>,
    calendar: Arc<dyn CalendarSync>,
}

impl BookingManager {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn ServiceRepository>,
        clients: Arc<dyn ClientRepository>,
        exceptions: Arc<dyn ScheduleExceptionRepository>,
        notifier: Arc<Notifier>,
        calendar: Arc<dyn CalendarSync>,
    ) -> Self {
        Self { bookings, services, clients, exceptions, notifier, calendar }
    }

    /// Occupied intervals and effective exceptions for one date,
    /// optionally leaving out the booking being moved.
    pub async fn day_context(
        &self,
        date: NaiveDate,
        exclude_booking: Option<&str>,
    ) -> Result<(Vec<OccupiedInterval>, Vec<ExceptionInterval>), AppError> {
        let mut day_bookings = self.bookings.list_by_date(date).await?;
        if let Some(id) = exclude_booking {
            day_bookings.retain(|b| b.id != id);
        }
        let services = self.services.list_all().await?;
        let occupied = occupied_intervals(&day_bookings, &services);

        let all_exceptions = self.exceptions.list().await?;
        let effective = effective_exceptions(date, &all_exceptions);

        Ok((occupied, effective))
    }

    pub async fn create(
        &self,
        settings: &BookingSettings,
        req: CreateBooking,
        system_action_day: Option<i32>,
    ) -> Result<Booking, AppError> {
        let service = self
            .services
            .find_by_id(&req.service_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

        let (occupied, exceptions) = self.day_context(req.date, None).await?;
        let free = slot_is_free(
            settings,
            service.duration_min,
            req.date,
            req.start_min,
            &occupied,
            &exceptions,
        )?;
        if !free {
            return Err(AppError::SlotUnavailable);
        }

        let is_system = system_action_day.is_some();
        let status = if is_system {
            // Synthetic bookings bypass the blacklist path entirely.
            BookingStatus::Confirmed
        } else {
            let client = self.ensure_client(&req).await?;
            if client.is_blacklisted {
                BookingStatus::Pending
            } else {
                BookingStatus::Confirmed
            }
        };

        let booking = Booking::new(NewBookingParams {
            service_id: req.service_id,
            date: req.date,
            start_min: req.start_min,
            duration_min: service.duration_min,
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            customer_email: req.customer_email,
            promo_code: req.promo_code,
            status,
            is_system,
            system_action_day,
        });

        let created = self.bookings.create_checked(&booking).await?;
        info!("Booking created: {} on {} at {}", created.id, created.date, created.start_min);

        if !is_system {
            self.spawn_notification(
                NotificationKind::BookingCreated,
                created.clone(),
                service.name.clone(),
                NotificationChannels::all(),
            );
        }
        self.spawn_calendar(CalendarAction::Create, created.clone());

        Ok(created)
    }

    pub async fn update_status(
        &self,
        id: &str,
        new_status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if !booking.status.can_transition_to(new_status) {
            return Err(AppError::InvalidTransition {
                from: booking.status.as_str().into(),
                to: new_status.as_str().into(),
            });
        }

        let updated = self.bookings.update_status(id, new_status).await?;

        if new_status == BookingStatus::NoShow {
            self.escalate_no_show(&updated).await?;
        }
        if new_status == BookingStatus::Cancelled {
            self.spawn_calendar(CalendarAction::Delete, updated.clone());
        }

        Ok(updated)
    }

    pub async fn reschedule(
        &self,
        settings: &BookingSettings,
        id: &str,
        new_date: NaiveDate,
        new_start_min: i32,
        new_service_id: Option<&str>,
    ) -> Result<Booking, AppError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if booking.status.is_terminal() {
            return Err(AppError::NotModifiable);
        }

        let service_id = new_service_id.unwrap_or(&booking.service_id);
        let service = self
            .services
            .find_by_id(service_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

        let (occupied, exceptions) = self.day_context(new_date, Some(id)).await?;
        let free = slot_is_free(
            settings,
            service.duration_min,
            new_date,
            new_start_min,
            &occupied,
            &exceptions,
        )?;
        if !free {
            return Err(AppError::SlotUnavailable);
        }

        let mut moved = booking;
        moved.service_id = service.id.clone();
        moved.date = new_date;
        moved.start_min = new_start_min;
        moved.end_min = new_start_min + service.duration_min;

        let updated = self.bookings.reschedule_checked(&moved).await?;
        info!("Booking rescheduled: {} -> {} at {}", updated.id, updated.date, updated.start_min);

        self.spawn_calendar(CalendarAction::Update, updated.clone());
        Ok(updated)
    }

    pub async fn cancel(
        &self,
        id: &str,
        channels: NotificationChannels,
    ) -> Result<Booking, AppError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if !booking.status.can_transition_to(BookingStatus::Cancelled) {
            return Err(AppError::InvalidTransition {
                from: booking.status.as_str().into(),
                to: BookingStatus::Cancelled.as_str().into(),
            });
        }

        let cancelled = self.bookings.update_status(id, BookingStatus::Cancelled).await?;
        info!("Booking cancelled: {}", cancelled.id);

        if !cancelled.is_system && (channels.email || channels.sms) {
            let service_name = self
                .services
                .find_by_id(&cancelled.service_id)
                .await?
                .map(|s| s.name)
                .unwrap_or_default();
            self.spawn_notification(
                NotificationKind::BookingCancelled,
                cancelled.clone(),
                service_name,
                channels,
            );
        }
        self.spawn_calendar(CalendarAction::Delete, cancelled.clone());

        Ok(cancelled)
    }

    pub async fn self_service_cancel(
        &self,
        settings: &BookingSettings,
        token: &str,
        now: NaiveDateTime,
    ) -> Result<Booking, AppError> {
        let booking = self
            .bookings
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if booking.status.is_terminal() {
            return Err(AppError::NotModifiable);
        }
        if !Self::within_cancel_window(settings, &booking, now)? {
            return Err(AppError::WindowExpired);
        }

        self.cancel(&booking.id, NotificationChannels::all()).await
    }

    pub async fn manage_lookup(
        &self,
        settings: &BookingSettings,
        token: &str,
        now: NaiveDateTime,
    ) -> Result<(Booking, bool), AppError> {
        let booking = self
            .bookings
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        let can_modify =
            !booking.status.is_terminal() && Self::within_cancel_window(settings, &booking, now)?;
        Ok((booking, can_modify))
    }

    fn within_cancel_window(
        settings: &BookingSettings,
        booking: &Booking,
        now: NaiveDateTime,
    ) -> Result<bool, AppError> {
        let start = NaiveTime::from_hms_opt(
            (booking.start_min / 60) as u32,
            (booking.start_min % 60) as u32,
            0,
        )
        .ok_or(AppError::Internal)?;
        let booking_dt = booking.date.and_time(start);
        Ok(now + TimeDelta::hours(settings.cancel_hours_before) <= booking_dt)
    }

    async fn ensure_client(&self, req: &CreateBooking) -> Result<Client, AppError> {
        match self.clients.find_by_phone(&req.customer_phone).await? {
            Some(client) => Ok(client),
            None => {
                let client = Client::new(
                    req.customer_phone.clone(),
                    Some(req.customer_name.clone()),
                    req.customer_email.clone(),
                );
                self.clients.create(&client).await
            }
        }
    }

    /// No-show escalation is a required side effect of the transition: the
    /// client row is created if absent, the counter bumped by one and the
    /// blacklist flag raised.
    async fn escalate_no_show(&self, booking: &Booking) -> Result<(), AppError> {
        let mut client = match self.clients.find_by_phone(&booking.customer_phone).await? {
            Some(c) => c,
            None => {
                let fresh = Client::new(
                    booking.customer_phone.clone(),
                    Some(booking.customer_name.clone()),
                    booking.customer_email.clone(),
                );
                self.clients.create(&fresh).await?
            }
        };

        client.no_show_count += 1;
        client.is_blacklisted = true;
        if client.blacklist_reason.is_none() {
            client.blacklist_reason = Some("no-show".into());
        }
        self.clients.update(&client).await?;
        info!("Client {} blacklisted after no-show (count {})", client.phone, client.no_show_count);

        let service_name = self
            .services
            .find_by_id(&booking.service_id)
            .await?
            .map(|s| s.name)
            .unwrap_or_default();
        self.spawn_notification(
            NotificationKind::BlacklistWarning,
            booking.clone(),
            service_name,
            NotificationChannels::all(),
        );
        Ok(())
    }

    fn spawn_notification(
        &self,
        kind: NotificationKind,
        booking: Booking,
        service_name: String,
        channels: NotificationChannels,
    ) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            notifier.dispatch(kind, &booking, &service_name, channels).await;
        });
    }

    fn spawn_calendar(&self, action: CalendarAction, booking: Booking) {
        let calendar = self.calendar.clone();
        let bookings = self.bookings.clone();
        tokio::spawn(async move {
            match calendar.push(action, &booking).await {
                Ok(Some(event_id)) if booking.calendar_event_id.as_deref() != Some(&event_id) => {
                    // Re-fetch: other writers may have touched the row since
                    // the snapshot was taken.
                    let result = match bookings.find_by_id(&booking.id).await {
                        Ok(Some(mut current)) => {
                            current.calendar_event_id = Some(event_id);
                            bookings.update(&current).await.map(|_| ())
                        }
                        Ok(None) => Ok(()),
                        Err(e) => Err(e),
                    };
                    if let Err(e) = result {
                        error!("Failed to persist calendar event id: {:?}", e);
                    }
                }
                Ok(_) => {}
                Err(e) => error!("Calendar sync failed for booking {}: {:?}", booking.id, e),
            }
        });
    }
}
