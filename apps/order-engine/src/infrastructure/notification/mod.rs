//! Event delivery plumbing.
//!
//! The dispatcher pushes events into a bounded channel; a forwarder task
//! drains the channel into a
//! [`NotificationSinkPort`](crate::application::ports::NotificationSinkPort).
//! Delivery failures are logged and swallowed, so a broken sink never backs
//! up into evaluation.

pub mod forwarder;
pub mod log_sink;

pub use forwarder::{event_channel, spawn_forwarder};
pub use log_sink::LogNotificationSink;
