pub mod sqlite_booking_repo;
pub mod sqlite_client_repo;
pub mod sqlite_exception_repo;
pub mod sqlite_service_repo;
pub mod sqlite_settings_repo;
pub mod sqlite_template_repo;
