//! Iceberg order aggregate (large order drip-fed in visible slices).

use serde::{Deserialize, Serialize};

use crate::domain::shared::{LegId, OrderId, Quantity, Symbol, Timestamp};

use super::super::value_objects::{OrderSide, OrderStatus};

/// One visible slice of an iceberg order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcebergSlice {
    /// Slice identifier, derived from the parent order id.
    pub id: LegId,
    /// Slice quantity. The last slice carries any remainder.
    pub quantity: Quantity,
    /// Slice status.
    pub status: OrderStatus,
    /// When the slice executed, if it did.
    pub executed_at: Option<Timestamp>,
}

/// Iceberg order: the total quantity is pre-split into display-sized slices
/// which execute at most one per price update, optionally paced by a minimum
/// interval between slices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcebergOrder {
    id: OrderId,
    symbol: Symbol,
    side: OrderSide,
    total_quantity: Quantity,
    display_quantity: Quantity,
    slices: Vec<IcebergSlice>,
    current_slice: usize,
    executed_quantity: Quantity,
    randomize_slices: bool,
    time_interval_ms: u64,
    last_slice_at: Option<Timestamp>,
    status: OrderStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl IcebergOrder {
    /// Assemble an iceberg order, pre-splitting the total into slices.
    ///
    /// The quantities must already be validated: positive, with the display
    /// quantity no larger than the total.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        side: OrderSide,
        total_quantity: Quantity,
        display_quantity: Quantity,
        randomize_slices: bool,
        time_interval_ms: u64,
        now: Timestamp,
    ) -> Self {
        let slices = split_slices(&id, total_quantity, display_quantity);
        Self {
            id,
            symbol,
            side,
            total_quantity,
            display_quantity,
            slices,
            current_slice: 0,
            executed_quantity: Quantity::ZERO,
            randomize_slices,
            time_interval_ms,
            last_slice_at: None,
            status: OrderStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Order identifier.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Instrument symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Total quantity across all slices.
    #[must_use]
    pub const fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Visible slice size.
    #[must_use]
    pub const fn display_quantity(&self) -> Quantity {
        self.display_quantity
    }

    /// All slices in execution order.
    #[must_use]
    pub fn slices(&self) -> &[IcebergSlice] {
        &self.slices
    }

    /// Index of the next slice to execute.
    #[must_use]
    pub const fn current_slice(&self) -> usize {
        self.current_slice
    }

    /// Quantity executed so far.
    #[must_use]
    pub const fn executed_quantity(&self) -> Quantity {
        self.executed_quantity
    }

    /// Whether slice sizes were requested to be randomized.
    #[must_use]
    pub const fn randomize_slices(&self) -> bool {
        self.randomize_slices
    }

    /// Minimum pause between slice executions, in milliseconds (0 = none).
    #[must_use]
    pub const fn time_interval_ms(&self) -> u64 {
        self.time_interval_ms
    }

    /// When the most recent slice executed.
    #[must_use]
    pub const fn last_slice_at(&self) -> Option<&Timestamp> {
        self.last_slice_at.as_ref()
    }

    /// Parent status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Last mutation time.
    #[must_use]
    pub const fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true while the order is still evaluated against prices.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// True once every slice has executed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_slice >= self.slices.len()
    }

    /// Whether the next slice may execute at `now`.
    ///
    /// Slices remain, the order is open, and if an interval is configured
    /// enough time has passed since the previous slice.
    #[must_use]
    pub fn can_advance(&self, now: Timestamp) -> bool {
        if !self.is_open() || self.is_complete() {
            return false;
        }
        if self.time_interval_ms == 0 {
            return true;
        }
        match self.last_slice_at {
            None => true,
            Some(last) => {
                let elapsed = now.duration_since(last).num_milliseconds();
                elapsed >= 0 && elapsed.unsigned_abs() >= self.time_interval_ms
            }
        }
    }

    /// Execute the current slice and advance.
    ///
    /// Returns the index of the slice that filled, or None when nothing
    /// remains. Moves the order to PARTIALLY_FILLED, or FILLED when this was
    /// the last slice.
    pub fn fill_current_slice(&mut self, now: Timestamp) -> Option<usize> {
        if !self.is_open() || self.is_complete() {
            return None;
        }
        let index = self.current_slice;
        let slice = &mut self.slices[index];
        slice.status = OrderStatus::Filled;
        slice.executed_at = Some(now);
        self.executed_quantity += slice.quantity;
        self.current_slice += 1;
        self.last_slice_at = Some(now);
        self.status = if self.is_complete() {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
        self.updated_at = now;
        Some(index)
    }

    /// Cancel the order and every pending slice. Returns false if already
    /// terminal.
    pub fn cancel(&mut self, now: Timestamp) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        for slice in &mut self.slices {
            if slice.status == OrderStatus::Pending {
                slice.status = OrderStatus::Cancelled;
            }
        }
        self.status = OrderStatus::Cancelled;
        self.updated_at = now;
        true
    }
}

/// Pre-split a total into display-sized slices, folding any remainder into
/// the final slice.
fn split_slices(parent: &OrderId, total: Quantity, display: Quantity) -> Vec<IcebergSlice> {
    let mut slices = Vec::new();
    let mut remaining = total.amount();
    let display = display.amount();
    let mut index = 0usize;
    while remaining > rust_decimal::Decimal::ZERO {
        let quantity = if remaining >= display { display } else { remaining };
        slices.push(IcebergSlice {
            id: LegId::derived(parent, &format!("slice_{index}")),
            quantity: Quantity::new(quantity),
            status: OrderStatus::Pending,
            executed_at: None,
        });
        remaining -= quantity;
        index += 1;
    }
    slices
}
