pub mod http_notification_gateway;
