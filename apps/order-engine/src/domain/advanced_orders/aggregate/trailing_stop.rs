//! Trailing stop order aggregate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, OrderId, Quantity, Symbol, Timestamp};

use super::super::value_objects::{OrderSide, OrderStatus};

/// Trailing stop order: the stop price ratchets behind the best observed
/// price and only ever tightens.
///
/// The side names the position being protected. A BUY trailing stop tracks a
/// rising peak, keeps its stop below the peak and triggers when price falls
/// back to it; SELL mirrors this downward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailingStopOrder {
    id: OrderId,
    symbol: Symbol,
    side: OrderSide,
    quantity: Quantity,
    trail_amount: Option<Decimal>,
    trail_percent: Option<Decimal>,
    activation_price: Option<Decimal>,
    peak_price: Decimal,
    current_stop_price: Decimal,
    is_activated: bool,
    status: OrderStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
    executed_at: Option<Timestamp>,
}

impl TrailingStopOrder {
    /// Assemble a trailing stop seeded from the current reference price.
    ///
    /// Without an activation price the order is live immediately, with the
    /// peak at the reference price and the stop one trail behind it. With an
    /// activation price the order idles until the market reaches it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        side: OrderSide,
        quantity: Quantity,
        trail_amount: Option<Decimal>,
        trail_percent: Option<Decimal>,
        activation_price: Option<Decimal>,
        reference_price: Decimal,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let current_stop_price = compute_stop(side, trail_amount, trail_percent, reference_price)
            .ok_or_else(|| DomainError::InvalidValue {
            field: "trail_amount".to_string(),
            message: "either trail_amount or trail_percent is required".to_string(),
        })?;
        Ok(Self {
            id,
            symbol,
            side,
            quantity,
            trail_amount,
            trail_percent,
            activation_price,
            peak_price: reference_price,
            current_stop_price,
            is_activated: activation_price.is_none(),
            status: OrderStatus::Active,
            created_at: now,
            updated_at: now,
            executed_at: None,
        })
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

    /// Fixed trail distance, if configured.
    #[must_use]
    pub const fn trail_amount(&self) -> Option<Decimal> {
        self.trail_amount
    }

    /// Percentage trail, if configured. Takes precedence over the amount.
    #[must_use]
    pub const fn trail_percent(&self) -> Option<Decimal> {
        self.trail_percent
    }

    /// Optional activation price the market must reach first.
    #[must_use]
    pub const fn activation_price(&self) -> Option<Decimal> {
        self.activation_price
    }

    /// Best price observed in the favorable direction since activation.
    #[must_use]
    pub const fn peak_price(&self) -> Decimal {
        self.peak_price
    }

    /// Current stop price.
    #[must_use]
    pub const fn current_stop_price(&self) -> Decimal {
        self.current_stop_price
    }

    /// True once the activation price was reached (or none was set).
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.is_activated
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

    /// When the stop triggered, if it did.
    #[must_use]
    pub const fn executed_at(&self) -> Option<&Timestamp> {
        self.executed_at.as_ref()
    }

    /// Returns true while the order is still evaluated against prices.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Activate the trail, reseeding the peak and stop from the activating
    /// price. A no-op if already activated.
    pub fn activate(&mut self, price: Decimal, now: Timestamp) {
        if self.is_activated {
            return;
        }
        self.is_activated = true;
        self.peak_price = price;
        self.current_stop_price = self.trail_stop(price);
        self.updated_at = now;
    }

    /// Advance the peak on a favorable price move and tighten the stop.
    ///
    /// The stop is clamped so it never loosens. Returns true if the stop
    /// moved.
    pub fn ratchet(&mut self, price: Decimal, now: Timestamp) -> bool {
        let improved = match self.side {
            OrderSide::Buy => price > self.peak_price,
            OrderSide::Sell => price < self.peak_price,
        };
        if !improved {
            return false;
        }
        self.peak_price = price;
        let candidate = self.trail_stop(price);
        let tightened = match self.side {
            OrderSide::Buy => candidate.max(self.current_stop_price),
            OrderSide::Sell => candidate.min(self.current_stop_price),
        };
        if tightened == self.current_stop_price {
            return false;
        }
        self.current_stop_price = tightened;
        self.updated_at = now;
        true
    }

    /// Mark the stop as triggered and the order filled.
    pub fn trigger(&mut self, now: Timestamp) {
        if self.status.is_terminal() {
            return;
        }
        self.status = OrderStatus::Filled;
        self.executed_at = Some(now);
        self.updated_at = now;
    }

    /// Cancel the order. Returns false if already terminal.
    pub fn cancel(&mut self, now: Timestamp) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = OrderStatus::Cancelled;
        self.updated_at = now;
        true
    }

    fn trail_stop(&self, peak: Decimal) -> Decimal {
        compute_stop(self.side, self.trail_amount, self.trail_percent, peak).unwrap_or(peak)
    }
}

/// Stop price one trail behind the given peak, or None when no trail
/// parameter is configured. Percent takes precedence over amount.
fn compute_stop(
    side: OrderSide,
    trail_amount: Option<Decimal>,
    trail_percent: Option<Decimal>,
    peak: Decimal,
) -> Option<Decimal> {
    if let Some(pct) = trail_percent {
        let fraction = pct / Decimal::ONE_HUNDRED;
        return Some(match side {
            OrderSide::Buy => peak * (Decimal::ONE - fraction),
            OrderSide::Sell => peak * (Decimal::ONE + fraction),
        });
    }
    trail_amount.map(|amt| match side {
        OrderSide::Buy => peak - amt,
        OrderSide::Sell => peak + amt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn buy_percent_trail(reference: Decimal) -> TrailingStopOrder {
        TrailingStopOrder::new(
            OrderId::generate(),
            Symbol::new("BTCUSDT"),
            OrderSide::Buy,
            Quantity::from_i64(1),
            None,
            Some(dec!(2)),
            None,
            reference,
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_without_trail_parameter_is_rejected() {
        let result = TrailingStopOrder::new(
            OrderId::generate(),
            Symbol::new("BTCUSDT"),
            OrderSide::Buy,
            Quantity::from_i64(1),
            None,
            None,
            None,
            dec!(50000),
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn initial_stop_sits_one_trail_behind_reference() {
        let order = buy_percent_trail(dec!(50000));
        assert!(order.is_activated());
        assert_eq!(order.peak_price(), dec!(50000));
        assert_eq!(order.current_stop_price(), dec!(49000.00));
    }

    #[test]
    fn activation_price_defers_the_trail() {
        let mut order = TrailingStopOrder::new(
            OrderId::generate(),
            Symbol::new("BTCUSDT"),
            OrderSide::Buy,
            Quantity::from_i64(1),
            Some(dec!(500)),
            None,
            Some(dec!(51000)),
            dec!(50000),
            Timestamp::now(),
        )
        .unwrap();
        assert!(!order.is_activated());

        order.activate(dec!(51000), Timestamp::now());
        assert!(order.is_activated());
        assert_eq!(order.peak_price(), dec!(51000));
        assert_eq!(order.current_stop_price(), dec!(50500));
    }

    #[test]
    fn ratchet_tightens_on_favorable_moves_only() {
        let mut order = buy_percent_trail(dec!(50000));

        assert!(order.ratchet(dec!(51000), Timestamp::now()));
        assert_eq!(order.peak_price(), dec!(51000));
        assert_eq!(order.current_stop_price(), dec!(49980.00));

        // Adverse move leaves peak and stop alone.
        assert!(!order.ratchet(dec!(50500), Timestamp::now()));
        assert_eq!(order.peak_price(), dec!(51000));
        assert_eq!(order.current_stop_price(), dec!(49980.00));

        assert!(order.ratchet(dec!(52000), Timestamp::now()));
        assert_eq!(order.current_stop_price(), dec!(50960.00));
    }

    #[test]
    fn sell_side_mirrors_downward() {
        let mut order = TrailingStopOrder::new(
            OrderId::generate(),
            Symbol::new("BTCUSDT"),
            OrderSide::Sell,
            Quantity::from_i64(1),
            Some(dec!(1000)),
            None,
            None,
            dec!(50000),
            Timestamp::now(),
        )
        .unwrap();
        assert_eq!(order.current_stop_price(), dec!(51000));

        assert!(order.ratchet(dec!(49000), Timestamp::now()));
        assert_eq!(order.current_stop_price(), dec!(50000));

        assert!(!order.ratchet(dec!(49500), Timestamp::now()));
        assert_eq!(order.current_stop_price(), dec!(50000));
    }

    #[test]
    fn percent_takes_precedence_over_amount() {
        let order = TrailingStopOrder::new(
            OrderId::generate(),
            Symbol::new("BTCUSDT"),
            OrderSide::Buy,
            Quantity::from_i64(1),
            Some(dec!(5000)),
            Some(dec!(2)),
            None,
            dec!(50000),
            Timestamp::now(),
        )
        .unwrap();
        assert_eq!(order.current_stop_price(), dec!(49000.00));
    }

    #[test]
    fn trigger_is_terminal() {
        let mut order = buy_percent_trail(dec!(50000));
        order.trigger(Timestamp::now());
        assert_eq!(order.status(), OrderStatus::Filled);
        assert!(order.executed_at().is_some());
        assert!(!order.cancel(Timestamp::now()));
    }
}
