//! Application Layer
//!
//! Orchestrates the domain: accepts creation and cancellation requests,
//! routes price updates to the evaluators and forwards the resulting events
//! to notification plumbing. Depends only on the domain layer and on ports.

pub mod dto;
pub mod ports;
pub mod services;

pub use dto::{
    CancelResponse, CreateBracketRequest, CreateIcebergRequest, CreateOcoRequest,
    CreateTrailingStopRequest, OcoLegRequest, OrdersSnapshot,
};
pub use ports::{NoOpNotificationSink, NotificationSinkPort};
pub use services::MonitoringDispatcher;
