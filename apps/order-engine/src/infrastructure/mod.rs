//! Infrastructure Layer
//!
//! Concrete adapters for the application's outbound ports.

pub mod notification;

pub use notification::{event_channel, spawn_forwarder, LogNotificationSink};
