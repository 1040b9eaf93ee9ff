use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    availability, booking, clients, exceptions, filler, health, manage, services, settings,
    templates,
};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public
        .route("/api/v1/services", get(services::list_services))
        .route("/api/v1/availability", get(availability::list_slots))
        .route("/api/v1/availability/dates", get(availability::list_dates))
        .route("/api/v1/bookings", post(booking::create_booking))

        // Customer self-service
        .route("/api/v1/manage/{token}", get(manage::get_booking_by_token))
        .route("/api/v1/manage/{token}/cancel", post(manage::cancel_booking_by_token))

        // Admin: bookings
        .route("/api/v1/admin/bookings", get(booking::list_bookings))
        .route("/api/v1/admin/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/admin/bookings/{booking_id}/status", post(booking::update_status))
        .route("/api/v1/admin/bookings/{booking_id}/reschedule", post(booking::reschedule_booking))
        .route("/api/v1/admin/bookings/{booking_id}/cancel", post(booking::cancel_booking))

        // Admin: services
        .route(
            "/api/v1/admin/services",
            get(services::list_all_services).post(services::create_service),
        )
        .route(
            "/api/v1/admin/services/{service_id}",
            axum::routing::put(services::update_service).delete(services::deactivate_service),
        )

        // Admin: schedule exceptions
        .route(
            "/api/v1/admin/exceptions",
            get(exceptions::list_exceptions).post(exceptions::create_exception),
        )
        .route(
            "/api/v1/admin/exceptions/{exception_id}",
            axum::routing::put(exceptions::update_exception).delete(exceptions::delete_exception),
        )

        // Admin: clients
        .route("/api/v1/admin/clients", get(clients::list_clients))
        .route(
            "/api/v1/admin/clients/{phone}",
            get(clients::get_client).put(clients::update_client),
        )

        // Admin: settings & templates
        .route(
            "/api/v1/admin/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route(
            "/api/v1/admin/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/api/v1/admin/templates/{template_id}",
            axum::routing::put(templates::update_template).delete(templates::delete_template),
        )

        // Admin: filler trigger
        .route("/api/v1/admin/filler/run", post(filler::run_filler))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
