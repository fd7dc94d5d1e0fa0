//! Bracket order aggregate (entry plus protective exits).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{LegId, OrderId, Quantity, Symbol, Timestamp};

use super::super::value_objects::{EntryKind, ExitKind, OrderSide, OrderStatus};

/// Entry leg of a bracket order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryLeg {
    /// Leg identifier, derived from the parent order id.
    pub id: LegId,
    /// Entry kind (market or limit).
    pub kind: EntryKind,
    /// Entry price. Required for limit entries; for market entries it is the
    /// reference price used when sizing the risk/reward ratio.
    pub price: Option<Decimal>,
    /// Leg status.
    pub status: OrderStatus,
    /// When the entry executed, if it did.
    pub executed_at: Option<Timestamp>,
}

/// Protective stop-loss leg of a bracket order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopLossLeg {
    /// Leg identifier, derived from the parent order id.
    pub id: LegId,
    /// Stop trigger price.
    pub stop_price: Decimal,
    /// Leg status.
    pub status: OrderStatus,
    /// When the stop executed, if it did.
    pub executed_at: Option<Timestamp>,
}

/// Take-profit leg of a bracket order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeProfitLeg {
    /// Leg identifier, derived from the parent order id.
    pub id: LegId,
    /// Profit-target limit price.
    pub limit_price: Decimal,
    /// Leg status.
    pub status: OrderStatus,
    /// When the target executed, if it did.
    pub executed_at: Option<Timestamp>,
}

/// Bracket order: an entry leg that, once filled, arms a stop-loss and a
/// take-profit pair behaving like an OCO.
///
/// The exits stay PENDING until the entry fills; the entry fill and an exit
/// fill never happen on the same price update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketOrder {
    id: OrderId,
    symbol: Symbol,
    side: OrderSide,
    quantity: Quantity,
    entry: EntryLeg,
    stop_loss: StopLossLeg,
    take_profit: TakeProfitLeg,
    risk_reward_ratio: Decimal,
    entry_filled: bool,
    exit_filled: Option<ExitKind>,
    status: OrderStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl BracketOrder {
    /// Assemble a bracket order. The entry leg is live, both exits pending.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        side: OrderSide,
        quantity: Quantity,
        entry_kind: EntryKind,
        entry_price: Option<Decimal>,
        stop_loss_price: Decimal,
        take_profit_price: Decimal,
        risk_reward_ratio: Decimal,
        now: Timestamp,
    ) -> Self {
        let entry = EntryLeg {
            id: LegId::derived(&id, "entry"),
            kind: entry_kind,
            price: entry_price,
            status: OrderStatus::Active,
            executed_at: None,
        };
        let stop_loss = StopLossLeg {
            id: LegId::derived(&id, "stop_loss"),
            stop_price: stop_loss_price,
            status: OrderStatus::Pending,
            executed_at: None,
        };
        let take_profit = TakeProfitLeg {
            id: LegId::derived(&id, "take_profit"),
            limit_price: take_profit_price,
            status: OrderStatus::Pending,
            executed_at: None,
        };
        Self {
            id,
            symbol,
            side,
            quantity,
            entry,
            stop_loss,
            take_profit,
            risk_reward_ratio,
            entry_filled: false,
            exit_filled: None,
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

    /// Order quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Entry leg.
    #[must_use]
    pub const fn entry(&self) -> &EntryLeg {
        &self.entry
    }

    /// Stop-loss leg.
    #[must_use]
    pub const fn stop_loss(&self) -> &StopLossLeg {
        &self.stop_loss
    }

    /// Take-profit leg.
    #[must_use]
    pub const fn take_profit(&self) -> &TakeProfitLeg {
        &self.take_profit
    }

    /// Risk/reward ratio computed at creation.
    #[must_use]
    pub const fn risk_reward_ratio(&self) -> Decimal {
        self.risk_reward_ratio
    }

    /// True once the entry leg has executed.
    #[must_use]
    pub const fn entry_filled(&self) -> bool {
        self.entry_filled
    }

    /// Which exit fired, if one did.
    #[must_use]
    pub const fn exit_filled(&self) -> Option<ExitKind> {
        self.exit_filled
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

    /// Fill the entry leg and arm both exit legs.
    ///
    /// A no-op if the entry already filled or the order is terminal.
    pub fn fill_entry(&mut self, now: Timestamp) {
        if self.entry_filled || self.status.is_terminal() {
            return;
        }
        self.entry.status = OrderStatus::Filled;
        self.entry.executed_at = Some(now);
        self.stop_loss.status = OrderStatus::Active;
        self.take_profit.status = OrderStatus::Active;
        self.entry_filled = true;
        self.updated_at = now;
    }

    /// Fill one exit leg, cancelling the sibling, and close the order.
    ///
    /// A no-op if the entry has not filled yet or the order is terminal.
    pub fn fill_exit(&mut self, exit: ExitKind, now: Timestamp) {
        if !self.entry_filled || self.status.is_terminal() {
            return;
        }
        match exit {
            ExitKind::StopLoss => {
                self.stop_loss.status = OrderStatus::Filled;
                self.stop_loss.executed_at = Some(now);
                self.take_profit.status = OrderStatus::Cancelled;
            }
            ExitKind::TakeProfit => {
                self.take_profit.status = OrderStatus::Filled;
                self.take_profit.executed_at = Some(now);
                self.stop_loss.status = OrderStatus::Cancelled;
            }
        }
        self.exit_filled = Some(exit);
        self.status = OrderStatus::Filled;
        self.updated_at = now;
    }

    /// Cancel the order and every non-filled leg. Returns false if already
    /// terminal.
    pub fn cancel(&mut self, now: Timestamp) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        if self.entry.status != OrderStatus::Filled {
            self.entry.status = OrderStatus::Cancelled;
        }
        self.stop_loss.status = OrderStatus::Cancelled;
        self.take_profit.status = OrderStatus::Cancelled;
        self.status = OrderStatus::Cancelled;
        self.updated_at = now;
        true
    }
}
