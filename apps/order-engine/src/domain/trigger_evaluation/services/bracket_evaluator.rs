//! Bracket order evaluation.

use rust_decimal::Decimal;

use crate::domain::advanced_orders::aggregate::BracketOrder;
use crate::domain::advanced_orders::value_objects::{EntryKind, ExitKind};
use crate::domain::advanced_orders::OrderEvent;
use crate::domain::shared::Timestamp;

use super::super::errors::EvaluationError;
use super::super::value_objects::predicates;

/// Evaluate a bracket order against a price update.
///
/// Strictly two-phase: an update either fills the entry (arming the exits)
/// or, on a later update, fills one exit. The entry and an exit never fill
/// on the same update. While both exits are armed the stop-loss is checked
/// first.
///
/// # Errors
///
/// Returns an error for a non-positive price, or when a limit entry carries
/// no price.
pub fn evaluate(
    order: &mut BracketOrder,
    price: Decimal,
    now: Timestamp,
) -> Result<Option<OrderEvent>, EvaluationError> {
    if price <= Decimal::ZERO {
        return Err(EvaluationError::InvalidPrice { price });
    }
    if !order.is_open() {
        return Ok(None);
    }

    if !order.entry_filled() {
        if entry_triggers(order, price)? {
            order.fill_entry(now);
            return Ok(Some(OrderEvent::BracketEntryFilled {
                order_id: order.id().clone(),
                symbol: order.symbol().clone(),
                occurred_at: now,
            }));
        }
        return Ok(None);
    }

    let side = order.side();
    let exit = if predicates::protective_stop_crossed(side, price, order.stop_loss().stop_price) {
        ExitKind::StopLoss
    } else if predicates::take_profit_reached(side, price, order.take_profit().limit_price) {
        ExitKind::TakeProfit
    } else {
        return Ok(None);
    };

    order.fill_exit(exit, now);
    Ok(Some(OrderEvent::BracketExitFilled {
        order_id: order.id().clone(),
        symbol: order.symbol().clone(),
        exit_kind: exit,
        occurred_at: now,
    }))
}

fn entry_triggers(order: &BracketOrder, price: Decimal) -> Result<bool, EvaluationError> {
    match order.entry().kind {
        EntryKind::Market => Ok(true),
        EntryKind::Limit => {
            let limit = order
                .entry()
                .price
                .ok_or_else(|| EvaluationError::InconsistentOrder {
                    order_id: order.id().clone(),
                    message: "limit entry has no price".to_string(),
                })?;
            Ok(predicates::limit_triggered(order.side(), price, limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advanced_orders::services::order_factory;
    use crate::domain::advanced_orders::value_objects::{OrderSide, OrderStatus};
    use crate::domain::shared::{Quantity, Symbol};
    use rust_decimal_macros::dec;

    /// BUY bracket: enter at 3000, stop-loss 2900, take-profit 3200.
    fn buy_bracket() -> BracketOrder {
        order_factory::create_bracket(
            Symbol::new("ETHUSDT"),
            OrderSide::Buy,
            Quantity::from_i64(1),
            EntryKind::Limit,
            Some(dec!(3000)),
            dec!(2900),
            dec!(3200),
        )
        .unwrap()
    }

    #[test]
    fn exit_levels_are_ignored_before_entry() {
        let mut order = buy_bracket();
        // 3250 is past the take-profit but above the limit entry: nothing
        // may fire.
        let event = evaluate(&mut order, dec!(3250), Timestamp::now()).unwrap();
        assert!(event.is_none());
        assert!(!order.entry_filled());
    }

    #[test]
    fn entry_fill_arms_exits_but_never_exits_same_update() {
        let mut order = buy_bracket();
        // 2850 satisfies the limit entry AND sits below the stop-loss. Only
        // the entry fires on this update.
        let event = evaluate(&mut order, dec!(2850), Timestamp::now())
            .unwrap()
            .unwrap();
        assert!(matches!(event, OrderEvent::BracketEntryFilled { .. }));
        assert!(order.entry_filled());
        assert_eq!(order.status(), OrderStatus::Active);

        // The very next update may stop out.
        let event = evaluate(&mut order, dec!(2850), Timestamp::now())
            .unwrap()
            .unwrap();
        match event {
            OrderEvent::BracketExitFilled { exit_kind, .. } => {
                assert_eq!(exit_kind, ExitKind::StopLoss);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(order.status(), OrderStatus::Filled);
    }

    #[test]
    fn take_profit_exit_after_entry() {
        let mut order = buy_bracket();
        evaluate(&mut order, dec!(3000), Timestamp::now()).unwrap();

        let event = evaluate(&mut order, dec!(3200), Timestamp::now())
            .unwrap()
            .unwrap();
        match event {
            OrderEvent::BracketExitFilled { exit_kind, .. } => {
                assert_eq!(exit_kind, ExitKind::TakeProfit);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(order.take_profit().status, OrderStatus::Filled);
        assert_eq!(order.stop_loss().status, OrderStatus::Cancelled);
    }

    #[test]
    fn market_entry_fills_on_first_update() {
        let mut order = order_factory::create_bracket(
            Symbol::new("ETHUSDT"),
            OrderSide::Buy,
            Quantity::from_i64(1),
            EntryKind::Market,
            None,
            dec!(2900),
            dec!(3200),
        )
        .unwrap();

        let event = evaluate(&mut order, dec!(3100), Timestamp::now())
            .unwrap()
            .unwrap();
        assert!(matches!(event, OrderEvent::BracketEntryFilled { .. }));
    }

    #[test]
    fn sell_bracket_mirrors_exits() {
        // SELL: enter at 3000, stop-loss above at 3100, take-profit below
        // at 2800.
        let mut order = order_factory::create_bracket(
            Symbol::new("ETHUSDT"),
            OrderSide::Sell,
            Quantity::from_i64(1),
            EntryKind::Limit,
            Some(dec!(3000)),
            dec!(3100),
            dec!(2800),
        )
        .unwrap();

        evaluate(&mut order, dec!(3000), Timestamp::now()).unwrap();
        let event = evaluate(&mut order, dec!(3100), Timestamp::now())
            .unwrap()
            .unwrap();
        match event {
            OrderEvent::BracketExitFilled { exit_kind, .. } => {
                assert_eq!(exit_kind, ExitKind::StopLoss);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
