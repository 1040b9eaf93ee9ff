use std::sync::Arc;

use serde::Deserialize;
use tera::{Context, Tera};
use tracing::{error, warn};

use crate::domain::models::booking::Booking;
use crate::domain::ports::{NotificationGateway, TemplateRepository};
use crate::domain::services::time::minutes_to_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    BookingCreated,
    BookingCancelled,
    BlacklistWarning,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::BookingCreated => "booking_created",
            NotificationKind::BookingCancelled => "booking_cancelled",
            NotificationKind::BlacklistWarning => "blacklist_warning",
        }
    }

    fn default_body(&self) -> &'static str {
        match self {
            NotificationKind::BookingCreated => {
                "Hi {{ customer_name }}, your {{ service_name }} appointment is booked for {{ date }} at {{ start_time }}."
            }
            NotificationKind::BookingCancelled => {
                "Hi {{ customer_name }}, your {{ service_name }} appointment on {{ date }} at {{ start_time }} has been cancelled."
            }
            NotificationKind::BlacklistWarning => {
                "Hi {{ customer_name }}, you missed your appointment on {{ date }}. Future bookings will require confirmation."
            }
        }
    }

    fn default_subject(&self) -> &'static str {
        match self {
            NotificationKind::BookingCreated => "Booking confirmed",
            NotificationKind::BookingCancelled => "Booking cancelled",
            NotificationKind::BlacklistWarning => "Missed appointment",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NotificationChannels {
    pub email: bool,
    pub sms: bool,
}

impl NotificationChannels {
    pub fn all() -> Self {
        Self { email: true, sms: true }
    }
}

/// Renders stored (or default) templates and hands them to the delivery
/// gateway. Callers spawn `dispatch` and move on; a failed channel is
/// logged and never surfaces into the triggering operation.
pub struct Notifier {
    templates: Arc<dyn TemplateRepository>,
    gateway: Arc<dyn NotificationGateway>,
}

impl Notifier {
    pub fn new(templates: Arc<dyn TemplateRepository>, gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { templates, gateway }
    }

    fn context(booking: &Booking, service_name: &str) -> Context {
        let mut ctx = Context::new();
        ctx.insert("customer_name", &booking.customer_name);
        ctx.insert("service_name", service_name);
        ctx.insert("date", &booking.date.format("%Y-%m-%d").to_string());
        ctx.insert(
            "start_time",
            &minutes_to_time(booking.start_min).unwrap_or_else(|_| "??:??".to_string()),
        );
        ctx
    }

    async fn render(
        &self,
        kind: NotificationKind,
        channel: &str,
        ctx: &Context,
    ) -> (Option<String>, String) {
        let stored = self
            .templates
            .find_by_kind_and_channel(kind.as_str(), channel)
            .await
            .unwrap_or_else(|e| {
                warn!("Template lookup failed, falling back to default: {:?}", e);
                None
            });

        let (subject, body_template) = match &stored {
            Some(t) => (t.subject.clone(), t.body.clone()),
            None => (Some(kind.default_subject().to_string()), kind.default_body().to_string()),
        };

        let body = Tera::one_off(&body_template, ctx, false).unwrap_or_else(|e| {
            error!("Template render failed for {} ({}): {:?}", kind.as_str(), channel, e);
            body_template.clone()
        });

        (subject, body)
    }

    pub async fn dispatch(
        &self,
        kind: NotificationKind,
        booking: &Booking,
        service_name: &str,
        channels: NotificationChannels,
    ) {
        let ctx = Self::context(booking, service_name);

        if channels.sms {
            let (_, body) = self.render(kind, "sms", &ctx).await;
            if let Err(e) = self.gateway.send("sms", &booking.customer_phone, None, &body).await {
                error!("SMS dispatch failed for booking {}: {:?}", booking.id, e);
            }
        }

        if channels.email {
            if let Some(email) = &booking.customer_email {
                let (subject, body) = self.render(kind, "email", &ctx).await;
                if let Err(e) = self
                    .gateway
                    .send("email", email, subject.as_deref(), &body)
                    .await
                {
                    error!("Email dispatch failed for booking {}: {:?}", booking.id, e);
                }
            }
        }
    }
}
