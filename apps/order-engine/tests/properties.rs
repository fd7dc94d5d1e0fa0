//! Property tests over the evaluators: invariants that must hold for any
//! price sequence.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rust_decimal::Decimal;

use order_engine::domain::advanced_orders::services::order_factory::{self, OcoLegSpec};
use order_engine::domain::trigger_evaluation::services::{
    iceberg_evaluator, oco_evaluator, trailing_stop_evaluator,
};
use order_engine::{LegKind, OrderSide, OrderStatus, Quantity, Symbol, Timestamp};

fn price(raw: u32) -> Decimal {
    Decimal::from(raw)
}

proptest! {
    /// No price sequence can ever leave both OCO legs filled, and at most
    /// one fill event is produced.
    #[test]
    fn oco_legs_are_mutually_exclusive(
        limit in 1_000u32..100_000,
        stop in 1_000u32..100_000,
        prices in proptest::collection::vec(1u32..200_000, 1..50),
    ) {
        let mut order = order_factory::create_oco(
            Symbol::new("ETHUSDT"),
            OrderSide::Sell,
            Quantity::from_i64(1),
            OcoLegSpec {
                kind: LegKind::Limit,
                price: Some(price(limit)),
                stop_price: None,
                limit_price: None,
            },
            OcoLegSpec {
                kind: LegKind::StopMarket,
                price: None,
                stop_price: Some(price(stop)),
                limit_price: None,
            },
        )
        .unwrap();

        let mut fills = 0;
        for p in prices {
            if oco_evaluator::evaluate(&mut order, price(p), Timestamp::now())
                .unwrap()
                .is_some()
            {
                fills += 1;
            }
        }

        prop_assert!(fills <= 1);
        let both_filled = order.leg1().status == OrderStatus::Filled
            && order.leg2().status == OrderStatus::Filled;
        prop_assert!(!both_filled);
        if order.status() == OrderStatus::Filled {
            prop_assert!(order.filled_leg().is_some());
        }
    }

    /// A BUY trailing stop never loosens its stop, its stop always sits
    /// below or at the peak, and it only triggers at or below the stop.
    #[test]
    fn trailing_stop_only_tightens(
        trail_amount in 1u32..5_000,
        start in 10_000u32..100_000,
        prices in proptest::collection::vec(5_000u32..200_000, 1..50),
    ) {
        let mut order = order_factory::create_trailing_stop(
            Symbol::new("BTCUSDT"),
            OrderSide::Buy,
            Quantity::from_i64(1),
            Some(price(trail_amount)),
            None,
            None,
            price(start),
        )
        .unwrap();

        let mut previous_stop = order.current_stop_price();
        for p in prices {
            if !order.is_open() {
                break;
            }
            trailing_stop_evaluator::evaluate(&mut order, price(p), Timestamp::now()).unwrap();

            prop_assert!(order.current_stop_price() >= previous_stop);
            prop_assert!(order.current_stop_price() <= order.peak_price());
            if order.status() == OrderStatus::Filled {
                prop_assert!(price(p) <= order.current_stop_price());
            }
            previous_stop = order.current_stop_price();
        }
    }

    /// Iceberg slices always sum to the total, regardless of how display
    /// divides into it, and each update fills at most one slice.
    #[test]
    fn iceberg_conserves_total_quantity(
        total in 1i64..200,
        display in 1i64..200,
    ) {
        prop_assume!(display <= total);
        let mut order = order_factory::create_iceberg(
            Symbol::new("BTCUSDT"),
            OrderSide::Buy,
            Quantity::from_i64(total),
            Quantity::from_i64(display),
            false,
            0,
        )
        .unwrap();

        let slice_sum: Decimal = order.slices().iter().map(|s| s.quantity.amount()).sum();
        prop_assert_eq!(slice_sum, Decimal::from(total));

        let mut updates = 0;
        while order.is_open() {
            let before = order.current_slice();
            iceberg_evaluator::evaluate(&mut order, price(100), Timestamp::now()).unwrap();
            prop_assert_eq!(order.current_slice(), before + 1);
            updates += 1;
            prop_assert!(updates <= order.slices().len());
        }
        prop_assert_eq!(order.executed_quantity().amount(), Decimal::from(total));
        prop_assert_eq!(order.status(), OrderStatus::Filled);
    }
}
