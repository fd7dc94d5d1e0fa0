//! In-memory registry of composite orders for one symbol.

use std::collections::HashSet;

use crate::domain::shared::{OrderId, Timestamp};

use super::aggregate::{AdvancedOrder, BracketOrder, IcebergOrder, OcoOrder, TrailingStopOrder};
use super::errors::OrderError;

/// Result of a cancellation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The order was open and is now cancelled.
    Cancelled,
    /// The order exists but already reached a terminal state.
    AlreadyTerminal,
    /// No order with that id is registered.
    NotFound,
}

/// Orders of a single symbol, grouped by kind and kept in insertion order.
///
/// Insertion order is the evaluation order, which makes same-tick behavior
/// deterministic. Terminal orders stay registered so snapshots and repeated
/// cancels can still see them.
#[derive(Debug, Default)]
pub struct OrderRegistry {
    ocos: Vec<OcoOrder>,
    brackets: Vec<BracketOrder>,
    trailing_stops: Vec<TrailingStopOrder>,
    icebergs: Vec<IcebergOrder>,
    ids: HashSet<OrderId>,
}

impl OrderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new order.
    ///
    /// # Errors
    ///
    /// Returns a validation error when an order with the same id is already
    /// registered.
    pub fn insert(&mut self, order: AdvancedOrder) -> Result<(), OrderError> {
        if self.ids.contains(order.id()) {
            return Err(OrderError::validation(
                "order_id",
                format!("order {} is already registered", order.id()),
            ));
        }
        self.ids.insert(order.id().clone());
        match order {
            AdvancedOrder::Oco(o) => self.ocos.push(o),
            AdvancedOrder::Bracket(o) => self.brackets.push(o),
            AdvancedOrder::TrailingStop(o) => self.trailing_stops.push(o),
            AdvancedOrder::Iceberg(o) => self.icebergs.push(o),
        }
        Ok(())
    }

    /// Whether an order with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &OrderId) -> bool {
        self.ids.contains(id)
    }

    /// Number of registered orders, terminal ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no orders are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// OCO orders in insertion order.
    #[must_use]
    pub fn ocos(&self) -> &[OcoOrder] {
        &self.ocos
    }

    /// Mutable view of the OCO orders.
    pub fn ocos_mut(&mut self) -> &mut [OcoOrder] {
        &mut self.ocos
    }

    /// Bracket orders in insertion order.
    #[must_use]
    pub fn brackets(&self) -> &[BracketOrder] {
        &self.brackets
    }

    /// Mutable view of the bracket orders.
    pub fn brackets_mut(&mut self) -> &mut [BracketOrder] {
        &mut self.brackets
    }

    /// Trailing stop orders in insertion order.
    #[must_use]
    pub fn trailing_stops(&self) -> &[TrailingStopOrder] {
        &self.trailing_stops
    }

    /// Mutable view of the trailing stop orders.
    pub fn trailing_stops_mut(&mut self) -> &mut [TrailingStopOrder] {
        &mut self.trailing_stops
    }

    /// Iceberg orders in insertion order.
    #[must_use]
    pub fn icebergs(&self) -> &[IcebergOrder] {
        &self.icebergs
    }

    /// Mutable view of the iceberg orders.
    pub fn icebergs_mut(&mut self) -> &mut [IcebergOrder] {
        &mut self.icebergs
    }

    /// Cancel an order by id. Idempotent: cancelling a terminal order
    /// reports [`CancelOutcome::AlreadyTerminal`] instead of failing.
    pub fn cancel(&mut self, id: &OrderId, now: Timestamp) -> CancelOutcome {
        if !self.ids.contains(id) {
            return CancelOutcome::NotFound;
        }
        if let Some(order) = self.ocos.iter_mut().find(|o| o.id() == id) {
            return cancelled(order.cancel(now));
        }
        if let Some(order) = self.brackets.iter_mut().find(|o| o.id() == id) {
            return cancelled(order.cancel(now));
        }
        if let Some(order) = self.trailing_stops.iter_mut().find(|o| o.id() == id) {
            return cancelled(order.cancel(now));
        }
        if let Some(order) = self.icebergs.iter_mut().find(|o| o.id() == id) {
            return cancelled(order.cancel(now));
        }
        CancelOutcome::NotFound
    }

    /// True if any registered order is still open.
    #[must_use]
    pub fn has_open_orders(&self) -> bool {
        self.ocos.iter().any(OcoOrder::is_open)
            || self.brackets.iter().any(BracketOrder::is_open)
            || self.trailing_stops.iter().any(TrailingStopOrder::is_open)
            || self.icebergs.iter().any(IcebergOrder::is_open)
    }
}

const fn cancelled(did_cancel: bool) -> CancelOutcome {
    if did_cancel {
        CancelOutcome::Cancelled
    } else {
        CancelOutcome::AlreadyTerminal
    }
}
