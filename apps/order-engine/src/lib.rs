// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order Engine - Rust Core Library
//!
//! Advanced order lifecycle engine for the paper-trading backend. Composite
//! orders (OCO, Bracket, Trailing Stop, Iceberg) are driven through their
//! state machines by incoming price ticks rather than by user commands.
//!
//! # Architecture (Clean Architecture + DDD)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `advanced_orders`: the four composite order aggregates, factory,
//!     registry, and lifecycle events
//!   - `trigger_evaluation`: pure per-order-type trigger evaluators
//! - **Application**: Orchestration and ports
//!   - `ports`: interfaces for external systems (`NotificationSinkPort`)
//!   - `services`: `MonitoringDispatcher` (per-symbol serialized dispatch)
//!   - `dto`: data transfer objects for the creation contract
//! - **Infrastructure**: Adapters
//!   - `notification`: bounded outbound event channel and forwarder task
//!
//! The engine is push-driven: the market-data source calls
//! [`MonitoringDispatcher::on_price_update`] and the engine emits
//! [`OrderEvent`] records to the notification channel. Persistence, the
//! REST surface, and the notification transport are external collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Dispatch orchestration and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::advanced_orders::{
    aggregate::{AdvancedOrder, BracketOrder, IcebergOrder, OcoOrder, TrailingStopOrder},
    errors::OrderError,
    events::OrderEvent,
    registry::{CancelOutcome, OrderRegistry},
    value_objects::{EntryKind, ExitKind, FilledLeg, LegKind, OrderSide, OrderStatus},
};
pub use domain::shared::{OrderId, Quantity, Symbol, Timestamp};

// Application re-exports
pub use application::dto::{
    CancelResponse, CreateBracketRequest, CreateIcebergRequest, CreateOcoRequest,
    CreateTrailingStopRequest, OcoLegRequest, OrdersSnapshot,
};
pub use application::ports::{NoOpNotificationSink, NotificationSinkPort};
pub use application::services::MonitoringDispatcher;

// Infrastructure re-exports
pub use infrastructure::notification::{LogNotificationSink, event_channel, spawn_forwarder};
