//! Side-aware price crossing predicates.
//!
//! All comparisons are inclusive: a price landing exactly on a level counts
//! as a crossing. Four predicates cover every trigger in the engine, each
//! mirrored between BUY and SELL.

use rust_decimal::Decimal;

use crate::domain::advanced_orders::OrderSide;

/// Limit order trigger: the price reached a favorable level.
///
/// BUY fills at or below the limit, SELL at or above it.
#[must_use]
pub fn limit_triggered(side: OrderSide, price: Decimal, limit: Decimal) -> bool {
    match side {
        OrderSide::Buy => price <= limit,
        OrderSide::Sell => price >= limit,
    }
}

/// Stop-entry trigger: the price crossed the stop in the adverse direction.
///
/// BUY fires at or above the stop (breakout entry), SELL at or below it.
#[must_use]
pub fn stop_crossed(side: OrderSide, price: Decimal, stop: Decimal) -> bool {
    match side {
        OrderSide::Buy => price >= stop,
        OrderSide::Sell => price <= stop,
    }
}

/// Protective stop trigger for a held position.
///
/// A BUY position is stopped out when the price falls to the stop, a SELL
/// position when it rises to it.
#[must_use]
pub fn protective_stop_crossed(side: OrderSide, price: Decimal, stop: Decimal) -> bool {
    match side {
        OrderSide::Buy => price <= stop,
        OrderSide::Sell => price >= stop,
    }
}

/// Take-profit trigger for a held position.
///
/// A BUY position takes profit when the price rises to the target, a SELL
/// position when it falls to it.
#[must_use]
pub fn take_profit_reached(side: OrderSide, price: Decimal, target: Decimal) -> bool {
    match side {
        OrderSide::Buy => price >= target,
        OrderSide::Sell => price <= target,
    }
}

/// Activation trigger for deferred trailing stops.
///
/// A BUY trail activates once the price rises to the activation level, a
/// SELL trail once it falls to it.
#[must_use]
pub fn activation_reached(side: OrderSide, price: Decimal, activation: Decimal) -> bool {
    match side {
        OrderSide::Buy => price >= activation,
        OrderSide::Sell => price <= activation,
    }
}
