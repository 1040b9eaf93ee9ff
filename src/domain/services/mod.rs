pub mod availability;
pub mod booking_manager;
pub mod exceptions;
pub mod filler;
pub mod notifications;
pub mod time;
