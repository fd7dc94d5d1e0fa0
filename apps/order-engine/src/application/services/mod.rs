//! Application services.

pub mod monitoring_dispatcher;

pub use monitoring_dispatcher::MonitoringDispatcher;
