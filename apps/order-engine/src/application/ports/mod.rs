//! Ports (interfaces) implemented by the infrastructure layer.

pub mod notification_sink;

pub use notification_sink::{NoOpNotificationSink, NotificationSinkPort};
