//! One-cancels-other (OCO) order aggregate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{LegId, OrderId, Quantity, Symbol, Timestamp};

use super::super::value_objects::{FilledLeg, LegKind, OrderSide, OrderStatus};

/// One leg of an OCO pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcoLeg {
    /// Leg identifier, derived from the parent order id.
    pub id: LegId,
    /// Leg kind (limit or stop style).
    pub kind: LegKind,
    /// Trigger price for a limit leg.
    pub price: Option<Decimal>,
    /// Trigger price for a stop-style leg.
    pub stop_price: Option<Decimal>,
    /// Execution limit for a stop-limit leg (not used for triggering).
    pub limit_price: Option<Decimal>,
    /// Leg status.
    pub status: OrderStatus,
    /// When this leg executed, if it did.
    pub executed_at: Option<Timestamp>,
}

impl OcoLeg {
    /// Create a live leg.
    #[must_use]
    pub const fn new(
        id: LegId,
        kind: LegKind,
        price: Option<Decimal>,
        stop_price: Option<Decimal>,
        limit_price: Option<Decimal>,
    ) -> Self {
        Self {
            id,
            kind,
            price,
            stop_price,
            limit_price,
            status: OrderStatus::Active,
            executed_at: None,
        }
    }
}

/// One-cancels-other order: two live legs where the first fill cancels the
/// sibling atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcoOrder {
    id: OrderId,
    symbol: Symbol,
    side: OrderSide,
    quantity: Quantity,
    leg1: OcoLeg,
    leg2: OcoLeg,
    status: OrderStatus,
    filled_leg: Option<FilledLeg>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl OcoOrder {
    /// Assemble an OCO order with both legs live.
    #[must_use]
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        side: OrderSide,
        quantity: Quantity,
        leg1: OcoLeg,
        leg2: OcoLeg,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            symbol,
            side,
            quantity,
            leg1,
            leg2,
            status: OrderStatus::Active,
            filled_leg: None,
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

    /// First leg.
    #[must_use]
    pub const fn leg1(&self) -> &OcoLeg {
        &self.leg1
    }

    /// Second leg.
    #[must_use]
    pub const fn leg2(&self) -> &OcoLeg {
        &self.leg2
    }

    /// Parent status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Which leg won, if the order filled.
    #[must_use]
    pub const fn filled_leg(&self) -> Option<FilledLeg> {
        self.filled_leg
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

    /// Fill the given leg and cancel its sibling in the same mutation.
    ///
    /// The winner moves to FILLED with an execution time, the sibling to
    /// CANCELLED, and the parent to FILLED. A no-op if the order is already
    /// terminal.
    pub fn fill_leg(&mut self, winner: FilledLeg, now: Timestamp) {
        if self.status.is_terminal() {
            return;
        }

        let (won, lost) = match winner {
            FilledLeg::Leg1 => (&mut self.leg1, &mut self.leg2),
            FilledLeg::Leg2 => (&mut self.leg2, &mut self.leg1),
        };
        won.status = OrderStatus::Filled;
        won.executed_at = Some(now);
        lost.status = OrderStatus::Cancelled;

        self.filled_leg = Some(winner);
        self.status = OrderStatus::Filled;
        self.updated_at = now;
    }

    /// Cancel the order and both legs. Returns false if already terminal.
    pub fn cancel(&mut self, now: Timestamp) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.leg1.status = OrderStatus::Cancelled;
        self.leg2.status = OrderStatus::Cancelled;
        self.status = OrderStatus::Cancelled;
        self.updated_at = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_oco() -> OcoOrder {
        let id = OrderId::generate();
        let leg1 = OcoLeg::new(
            LegId::derived(&id, "leg1"),
            LegKind::Limit,
            Some(dec!(3200)),
            None,
            None,
        );
        let leg2 = OcoLeg::new(
            LegId::derived(&id, "leg2"),
            LegKind::StopMarket,
            None,
            Some(dec!(2900)),
            None,
        );
        OcoOrder::new(
            id,
            Symbol::new("ETHUSDT"),
            OrderSide::Sell,
            Quantity::from_i64(2),
            leg1,
            leg2,
            Timestamp::now(),
        )
    }

    #[test]
    fn new_oco_has_both_legs_live() {
        let order = sample_oco();
        assert_eq!(order.status(), OrderStatus::Active);
        assert_eq!(order.leg1().status, OrderStatus::Active);
        assert_eq!(order.leg2().status, OrderStatus::Active);
        assert!(order.filled_leg().is_none());
    }

    #[test]
    fn fill_leg_cancels_sibling_atomically() {
        let mut order = sample_oco();
        order.fill_leg(FilledLeg::Leg2, Timestamp::now());

        assert_eq!(order.status(), OrderStatus::Filled);
        assert_eq!(order.filled_leg(), Some(FilledLeg::Leg2));
        assert_eq!(order.leg2().status, OrderStatus::Filled);
        assert!(order.leg2().executed_at.is_some());
        assert_eq!(order.leg1().status, OrderStatus::Cancelled);
        assert!(order.leg1().executed_at.is_none());
    }

    #[test]
    fn fill_leg_is_noop_once_terminal() {
        let mut order = sample_oco();
        order.fill_leg(FilledLeg::Leg1, Timestamp::now());
        order.fill_leg(FilledLeg::Leg2, Timestamp::now());

        assert_eq!(order.filled_leg(), Some(FilledLeg::Leg1));
        assert_eq!(order.leg2().status, OrderStatus::Cancelled);
    }

    #[test]
    fn cancel_cancels_both_legs() {
        let mut order = sample_oco();
        assert!(order.cancel(Timestamp::now()));
        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.leg1().status, OrderStatus::Cancelled);
        assert_eq!(order.leg2().status, OrderStatus::Cancelled);

        assert!(!order.cancel(Timestamp::now()));
    }
}
