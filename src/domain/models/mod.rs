pub mod booking;
pub mod client;
pub mod schedule_exception;
pub mod service;
pub mod settings;
pub mod template;
