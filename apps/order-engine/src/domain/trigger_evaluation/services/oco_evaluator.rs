//! OCO order evaluation.

use rust_decimal::Decimal;

use crate::domain::advanced_orders::aggregate::{OcoLeg, OcoOrder};
use crate::domain::advanced_orders::value_objects::{FilledLeg, LegKind, OrderSide};
use crate::domain::advanced_orders::OrderEvent;
use crate::domain::shared::Timestamp;

use super::super::errors::EvaluationError;
use super::super::value_objects::predicates;

/// Evaluate an OCO order against a price update.
///
/// Both legs are checked on every update; if both would trigger on the same
/// price, leg1 wins. The winning fill and the sibling cancellation happen in
/// one mutation, so no observer can see both legs filled.
///
/// # Errors
///
/// Returns an error for a non-positive price, or when a live leg is missing
/// the price its kind requires.
pub fn evaluate(
    order: &mut OcoOrder,
    price: Decimal,
    now: Timestamp,
) -> Result<Option<OrderEvent>, EvaluationError> {
    if price <= Decimal::ZERO {
        return Err(EvaluationError::InvalidPrice { price });
    }
    if !order.is_open() {
        return Ok(None);
    }

    let side = order.side();
    let winner = if leg_triggers(order, side, order.leg1(), price)? {
        FilledLeg::Leg1
    } else if leg_triggers(order, side, order.leg2(), price)? {
        FilledLeg::Leg2
    } else {
        return Ok(None);
    };

    order.fill_leg(winner, now);
    Ok(Some(OrderEvent::OcoFilled {
        order_id: order.id().clone(),
        symbol: order.symbol().clone(),
        filled_leg: winner,
        occurred_at: now,
    }))
}

fn leg_triggers(
    order: &OcoOrder,
    side: OrderSide,
    leg: &OcoLeg,
    price: Decimal,
) -> Result<bool, EvaluationError> {
    let (level, favorable) = match leg.kind {
        LegKind::Limit => (leg.price, true),
        LegKind::StopMarket | LegKind::StopLimit => (leg.stop_price, false),
    };
    let level = level.ok_or_else(|| EvaluationError::InconsistentOrder {
        order_id: order.id().clone(),
        message: format!("leg {} has no trigger price", leg.id),
    })?;
    Ok(if favorable {
        predicates::limit_triggered(side, price, level)
    } else {
        predicates::stop_crossed(side, price, level)
    })
}
