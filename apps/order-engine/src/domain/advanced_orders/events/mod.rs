//! Domain events emitted when order lifecycles progress.
//!
//! Events are facts about state changes that already happened; evaluators
//! return them and the dispatcher forwards them to notification sinks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{OrderId, Quantity, Symbol, Timestamp};

use super::value_objects::{ExitKind, FilledLeg};

/// Event describing a composite order state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// An OCO leg filled and its sibling was cancelled.
    OcoFilled {
        /// Parent order.
        order_id: OrderId,
        /// Instrument symbol.
        symbol: Symbol,
        /// Which leg won.
        filled_leg: FilledLeg,
        /// When the fill happened.
        occurred_at: Timestamp,
    },
    /// A bracket entry filled, arming the exit pair.
    BracketEntryFilled {
        /// Parent order.
        order_id: OrderId,
        /// Instrument symbol.
        symbol: Symbol,
        /// When the fill happened.
        occurred_at: Timestamp,
    },
    /// A bracket exit filled and the order closed.
    BracketExitFilled {
        /// Parent order.
        order_id: OrderId,
        /// Instrument symbol.
        symbol: Symbol,
        /// Which exit fired.
        exit_kind: ExitKind,
        /// When the fill happened.
        occurred_at: Timestamp,
    },
    /// A trailing stop ratcheted to a tighter stop price.
    TrailingStopUpdated {
        /// Parent order.
        order_id: OrderId,
        /// Instrument symbol.
        symbol: Symbol,
        /// New stop price.
        current_stop_price: Decimal,
        /// Best favorable price observed so far.
        peak_price: Decimal,
        /// When the update happened.
        occurred_at: Timestamp,
    },
    /// A trailing stop triggered and the order filled.
    TrailingStopTriggered {
        /// Parent order.
        order_id: OrderId,
        /// Instrument symbol.
        symbol: Symbol,
        /// Stop price at trigger time.
        current_stop_price: Decimal,
        /// When the trigger happened.
        occurred_at: Timestamp,
    },
    /// An iceberg slice executed.
    IcebergSliceFilled {
        /// Parent order.
        order_id: OrderId,
        /// Instrument symbol.
        symbol: Symbol,
        /// Zero-based index of the slice that filled.
        slice_index: usize,
        /// Total quantity executed so far.
        executed_quantity: Quantity,
        /// When the slice executed.
        occurred_at: Timestamp,
    },
    /// The final iceberg slice executed and the order filled.
    IcebergComplete {
        /// Parent order.
        order_id: OrderId,
        /// Instrument symbol.
        symbol: Symbol,
        /// Total executed quantity (equals the order total).
        executed_quantity: Quantity,
        /// When the order completed.
        occurred_at: Timestamp,
    },
    /// An order was cancelled on request.
    OrderCancelled {
        /// Cancelled order.
        order_id: OrderId,
        /// Instrument symbol.
        symbol: Symbol,
        /// When the cancellation happened.
        occurred_at: Timestamp,
    },
}

impl OrderEvent {
    /// Stable event type name, matching the serialized tag.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::OcoFilled { .. } => "OCO_FILLED",
            Self::BracketEntryFilled { .. } => "BRACKET_ENTRY_FILLED",
            Self::BracketExitFilled { .. } => "BRACKET_EXIT_FILLED",
            Self::TrailingStopUpdated { .. } => "TRAILING_STOP_UPDATED",
            Self::TrailingStopTriggered { .. } => "TRAILING_STOP_TRIGGERED",
            Self::IcebergSliceFilled { .. } => "ICEBERG_SLICE_FILLED",
            Self::IcebergComplete { .. } => "ICEBERG_COMPLETE",
            Self::OrderCancelled { .. } => "ORDER_CANCELLED",
        }
    }

    /// Order the event refers to.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::OcoFilled { order_id, .. }
            | Self::BracketEntryFilled { order_id, .. }
            | Self::BracketExitFilled { order_id, .. }
            | Self::TrailingStopUpdated { order_id, .. }
            | Self::TrailingStopTriggered { order_id, .. }
            | Self::IcebergSliceFilled { order_id, .. }
            | Self::IcebergComplete { order_id, .. }
            | Self::OrderCancelled { order_id, .. } => order_id,
        }
    }

    /// Symbol the event refers to.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        match self {
            Self::OcoFilled { symbol, .. }
            | Self::BracketEntryFilled { symbol, .. }
            | Self::BracketExitFilled { symbol, .. }
            | Self::TrailingStopUpdated { symbol, .. }
            | Self::TrailingStopTriggered { symbol, .. }
            | Self::IcebergSliceFilled { symbol, .. }
            | Self::IcebergComplete { symbol, .. }
            | Self::OrderCancelled { symbol, .. } => symbol,
        }
    }

    /// When the underlying state change happened.
    #[must_use]
    pub const fn occurred_at(&self) -> &Timestamp {
        match self {
            Self::OcoFilled { occurred_at, .. }
            | Self::BracketEntryFilled { occurred_at, .. }
            | Self::BracketExitFilled { occurred_at, .. }
            | Self::TrailingStopUpdated { occurred_at, .. }
            | Self::TrailingStopTriggered { occurred_at, .. }
            | Self::IcebergSliceFilled { occurred_at, .. }
            | Self::IcebergComplete { occurred_at, .. }
            | Self::OrderCancelled { occurred_at, .. } => occurred_at,
        }
    }
}
