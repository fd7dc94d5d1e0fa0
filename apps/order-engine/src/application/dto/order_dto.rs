//! Request and response shapes for order operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::advanced_orders::aggregate::{
    BracketOrder, IcebergOrder, OcoOrder, TrailingStopOrder,
};
use crate::domain::advanced_orders::value_objects::{EntryKind, LegKind, OrderSide};
use crate::domain::shared::OrderId;

/// One OCO leg as supplied by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcoLegRequest {
    /// Leg kind.
    pub kind: LegKind,
    /// Trigger price for a limit leg.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Trigger price for a stop-style leg.
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Execution limit for a stop-limit leg.
    #[serde(default)]
    pub limit_price: Option<Decimal>,
}

/// Request to create an OCO order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOcoRequest {
    /// Instrument symbol (normalized to uppercase).
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Quantity shared by both legs.
    pub quantity: Decimal,
    /// First leg; wins same-update ties.
    pub leg1: OcoLegRequest,
    /// Second leg.
    pub leg2: OcoLegRequest,
}

/// Request to create a bracket order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBracketRequest {
    /// Instrument symbol (normalized to uppercase).
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Order quantity.
    pub quantity: Decimal,
    /// Entry kind.
    pub entry_kind: EntryKind,
    /// Entry price; required for limit entries.
    #[serde(default)]
    pub entry_price: Option<Decimal>,
    /// Protective stop level.
    pub stop_loss_price: Decimal,
    /// Profit target level.
    pub take_profit_price: Decimal,
}

/// Request to create a trailing stop order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrailingStopRequest {
    /// Instrument symbol (normalized to uppercase).
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Order quantity.
    pub quantity: Decimal,
    /// Fixed trail distance.
    #[serde(default)]
    pub trail_amount: Option<Decimal>,
    /// Percentage trail; takes precedence over the amount.
    #[serde(default)]
    pub trail_percent: Option<Decimal>,
    /// Optional activation level the market must reach first.
    #[serde(default)]
    pub activation_price: Option<Decimal>,
    /// Price to seed the trail from. Falls back to the last observed market
    /// price for the symbol when omitted.
    #[serde(default)]
    pub reference_price: Option<Decimal>,
}

/// Request to create an iceberg order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIcebergRequest {
    /// Instrument symbol (normalized to uppercase).
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Total quantity to execute.
    pub total_quantity: Decimal,
    /// Visible slice size.
    pub display_quantity: Decimal,
    /// Whether slice sizes should be randomized.
    #[serde(default)]
    pub randomize_slices: bool,
    /// Minimum pause between slice executions, in milliseconds.
    #[serde(default)]
    pub time_interval_ms: u64,
}

/// Outcome of a cancellation request.
///
/// Cancellation is idempotent, so an unknown id or an already terminal order
/// is reported here rather than as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    /// The id that was asked to cancel.
    pub order_id: OrderId,
    /// Whether an order with that id exists.
    pub found: bool,
    /// Whether this request moved the order to CANCELLED.
    pub cancelled: bool,
}

/// Snapshot of every registered order, grouped by kind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrdersSnapshot {
    /// OCO orders.
    pub oco: Vec<OcoOrder>,
    /// Bracket orders.
    pub bracket: Vec<BracketOrder>,
    /// Trailing stop orders.
    pub trailing_stop: Vec<TrailingStopOrder>,
    /// Iceberg orders.
    pub iceberg: Vec<IcebergOrder>,
}

impl OrdersSnapshot {
    /// Total number of orders in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.oco.len() + self.bracket.len() + self.trailing_stop.len() + self.iceberg.len()
    }

    /// True when the snapshot holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
