//! Advanced Orders Bounded Context
//!
//! Composite order types whose lifecycle is driven by market prices: OCO
//! (one-cancels-other), Bracket (entry plus dependent exits), Trailing Stop
//! (ratcheting protective stop), and Iceberg (sliced hidden quantity).
//!
//! The aggregates here carry the state-machine transitions and invariants;
//! deciding *when* a transition applies belongs to
//! [`crate::domain::trigger_evaluation`].

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod registry;
pub mod services;
pub mod value_objects;

pub use aggregate::{AdvancedOrder, BracketOrder, IcebergOrder, OcoOrder, TrailingStopOrder};
pub use errors::OrderError;
pub use events::OrderEvent;
pub use registry::{CancelOutcome, OrderRegistry};
pub use value_objects::{EntryKind, ExitKind, FilledLeg, LegKind, OrderSide, OrderStatus};
