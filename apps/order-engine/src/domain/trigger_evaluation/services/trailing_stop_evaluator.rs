//! Trailing stop evaluation.

use rust_decimal::Decimal;

use crate::domain::advanced_orders::aggregate::TrailingStopOrder;
use crate::domain::advanced_orders::OrderEvent;
use crate::domain::shared::Timestamp;

use super::super::errors::EvaluationError;
use super::super::value_objects::predicates;

/// Evaluate a trailing stop against a price update.
///
/// Before activation only the activation level is watched. Once active, a
/// favorable move ratchets the peak and tightens the stop; an adverse move
/// leaves them alone and may land on the stop, triggering the order.
///
/// # Errors
///
/// Returns an error for a non-positive price.
pub fn evaluate(
    order: &mut TrailingStopOrder,
    price: Decimal,
    now: Timestamp,
) -> Result<Option<OrderEvent>, EvaluationError> {
    if price <= Decimal::ZERO {
        return Err(EvaluationError::InvalidPrice { price });
    }
    if !order.is_open() {
        return Ok(None);
    }

    if !order.is_activated() {
        let Some(activation) = order.activation_price() else {
            return Err(EvaluationError::InconsistentOrder {
                order_id: order.id().clone(),
                message: "inactive trail without an activation price".to_string(),
            });
        };
        if !predicates::activation_reached(order.side(), price, activation) {
            return Ok(None);
        }
        order.activate(price, now);
        return Ok(Some(updated_event(order, now)));
    }

    let stop_moved = order.ratchet(price, now);

    if predicates::protective_stop_crossed(order.side(), price, order.current_stop_price()) {
        order.trigger(now);
        return Ok(Some(OrderEvent::TrailingStopTriggered {
            order_id: order.id().clone(),
            symbol: order.symbol().clone(),
            current_stop_price: order.current_stop_price(),
            occurred_at: now,
        }));
    }

    if stop_moved {
        return Ok(Some(updated_event(order, now)));
    }
    Ok(None)
}

fn updated_event(order: &TrailingStopOrder, now: Timestamp) -> OrderEvent {
    OrderEvent::TrailingStopUpdated {
        order_id: order.id().clone(),
        symbol: order.symbol().clone(),
        current_stop_price: order.current_stop_price(),
        peak_price: order.peak_price(),
        occurred_at: now,
    }
}
