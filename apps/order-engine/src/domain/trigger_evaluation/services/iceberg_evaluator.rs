//! Iceberg order evaluation.

use rust_decimal::Decimal;

use crate::domain::advanced_orders::aggregate::IcebergOrder;
use crate::domain::advanced_orders::OrderEvent;
use crate::domain::shared::Timestamp;

use super::super::errors::EvaluationError;

/// Evaluate an iceberg order against a price update.
///
/// At most one slice executes per update; a configured pacing interval can
/// hold a slice back until enough time has passed since the previous one.
/// Completing the final slice yields both a slice event and a completion
/// event.
///
/// # Errors
///
/// Returns an error for a non-positive price.
pub fn evaluate(
    order: &mut IcebergOrder,
    price: Decimal,
    now: Timestamp,
) -> Result<Vec<OrderEvent>, EvaluationError> {
    if price <= Decimal::ZERO {
        return Err(EvaluationError::InvalidPrice { price });
    }
    if !order.can_advance(now) {
        return Ok(Vec::new());
    }

    let Some(slice_index) = order.fill_current_slice(now) else {
        return Ok(Vec::new());
    };

    let mut events = vec![OrderEvent::IcebergSliceFilled {
        order_id: order.id().clone(),
        symbol: order.symbol().clone(),
        slice_index,
        executed_quantity: order.executed_quantity(),
        occurred_at: now,
    }];
    if order.is_complete() {
        events.push(OrderEvent::IcebergComplete {
            order_id: order.id().clone(),
            symbol: order.symbol().clone(),
            executed_quantity: order.executed_quantity(),
            occurred_at: now,
        });
    }
    Ok(events)
}
