pub mod calendar;
pub mod factory;
pub mod notify;
pub mod repositories;
