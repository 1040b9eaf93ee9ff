pub mod http_calendar_sync;
