//! Price-update routing and order lifecycle orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::application::dto::{
    CancelResponse, CreateBracketRequest, CreateIcebergRequest, CreateOcoRequest,
    CreateTrailingStopRequest, OrdersSnapshot,
};
use crate::domain::advanced_orders::aggregate::{
    AdvancedOrder, BracketOrder, IcebergOrder, OcoOrder, TrailingStopOrder,
};
use crate::domain::advanced_orders::services::order_factory::{self, OcoLegSpec};
use crate::domain::advanced_orders::{CancelOutcome, OrderError, OrderEvent, OrderRegistry};
use crate::domain::shared::{OrderId, Quantity, Symbol, Timestamp};
use crate::domain::trigger_evaluation::services::{
    bracket_evaluator, iceberg_evaluator, oco_evaluator, trailing_stop_evaluator,
};

/// Routes price updates to the evaluators and owns the order registries.
///
/// Orders are sharded by symbol, each shard behind its own async mutex, so
/// updates for different symbols evaluate concurrently while everything
/// touching one symbol (evaluation, creation, cancellation) serializes.
/// Events are emitted fire-and-forget through a bounded channel; when the
/// channel is full the event is dropped with a warning rather than stalling
/// evaluation.
pub struct MonitoringDispatcher {
    shards: RwLock<HashMap<Symbol, Arc<Mutex<OrderRegistry>>>>,
    symbol_index: RwLock<HashMap<OrderId, Symbol>>,
    last_prices: RwLock<HashMap<Symbol, Decimal>>,
    events_tx: Sender<OrderEvent>,
}

impl MonitoringDispatcher {
    /// Create a dispatcher emitting events into the given channel.
    #[must_use]
    pub fn new(events_tx: Sender<OrderEvent>) -> Self {
        Self {
            shards: RwLock::new(HashMap::new()),
            symbol_index: RwLock::new(HashMap::new()),
            last_prices: RwLock::new(HashMap::new()),
            events_tx,
        }
    }

    /// Apply one price update to every order registered for the symbol.
    ///
    /// Orders are evaluated in creation order within each kind (OCO,
    /// bracket, trailing stop, iceberg). A failure evaluating one order is
    /// logged and does not stop the others. Returns the number of events
    /// emitted.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive price.
    pub async fn on_price_update(
        &self,
        symbol: Symbol,
        price: Decimal,
        now: Timestamp,
    ) -> Result<usize, OrderError> {
        if price <= Decimal::ZERO {
            return Err(OrderError::validation("price", "must be positive"));
        }
        self.last_prices
            .write()
            .await
            .insert(symbol.clone(), price);

        let shard = self.shards.read().await.get(&symbol).cloned();
        let Some(shard) = shard else {
            debug!(symbol = %symbol, %price, "price update for symbol without orders");
            return Ok(0);
        };

        let mut events = Vec::new();
        {
            let mut registry = shard.lock().await;
            for order in registry.ocos_mut() {
                match oco_evaluator::evaluate(order, price, now) {
                    Ok(Some(event)) => events.push(event),
                    Ok(None) => {}
                    Err(err) => {
                        error!(order_id = %order.id(), error = %err, "oco evaluation failed");
                    }
                }
            }
            for order in registry.brackets_mut() {
                match bracket_evaluator::evaluate(order, price, now) {
                    Ok(Some(event)) => events.push(event),
                    Ok(None) => {}
                    Err(err) => {
                        error!(order_id = %order.id(), error = %err, "bracket evaluation failed");
                    }
                }
            }
            for order in registry.trailing_stops_mut() {
                match trailing_stop_evaluator::evaluate(order, price, now) {
                    Ok(Some(event)) => events.push(event),
                    Ok(None) => {}
                    Err(err) => {
                        error!(
                            order_id = %order.id(),
                            error = %err,
                            "trailing stop evaluation failed"
                        );
                    }
                }
            }
            for order in registry.icebergs_mut() {
                match iceberg_evaluator::evaluate(order, price, now) {
                    Ok(more) => events.extend(more),
                    Err(err) => {
                        error!(order_id = %order.id(), error = %err, "iceberg evaluation failed");
                    }
                }
            }
        }

        let emitted = events.len();
        if emitted > 0 {
            debug!(symbol = %symbol, %price, emitted, "price update produced events");
        }
        for event in events {
            self.publish(event);
        }
        Ok(emitted)
    }

    /// Create and register an OCO order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad request.
    pub async fn create_oco(&self, request: CreateOcoRequest) -> Result<OcoOrder, OrderError> {
        let order = order_factory::create_oco(
            Symbol::new(&request.symbol),
            request.side,
            Quantity::new(request.quantity),
            leg_spec(&request.leg1),
            leg_spec(&request.leg2),
        )?;
        info!(order_id = %order.id(), symbol = %order.symbol(), "created oco order");
        let snapshot = order.clone();
        self.register(AdvancedOrder::Oco(order)).await?;
        Ok(snapshot)
    }

    /// Create and register a bracket order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad request.
    pub async fn create_bracket(
        &self,
        request: CreateBracketRequest,
    ) -> Result<BracketOrder, OrderError> {
        let order = order_factory::create_bracket(
            Symbol::new(&request.symbol),
            request.side,
            Quantity::new(request.quantity),
            request.entry_kind,
            request.entry_price,
            request.stop_loss_price,
            request.take_profit_price,
        )?;
        info!(
            order_id = %order.id(),
            symbol = %order.symbol(),
            risk_reward = %order.risk_reward_ratio(),
            "created bracket order"
        );
        let snapshot = order.clone();
        self.register(AdvancedOrder::Bracket(order)).await?;
        Ok(snapshot)
    }

    /// Create and register a trailing stop order.
    ///
    /// The trail is seeded from the request's reference price, falling back
    /// to the last observed market price for the symbol.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad request, including when no
    /// reference price is available at all.
    pub async fn create_trailing_stop(
        &self,
        request: CreateTrailingStopRequest,
    ) -> Result<TrailingStopOrder, OrderError> {
        let symbol = Symbol::new(&request.symbol);
        let reference_price = match request.reference_price {
            Some(price) => price,
            None => self.last_price(&symbol).await.ok_or_else(|| {
                OrderError::validation(
                    "reference_price",
                    "required when no market price has been observed for the symbol",
                )
            })?,
        };
        let order = order_factory::create_trailing_stop(
            symbol,
            request.side,
            Quantity::new(request.quantity),
            request.trail_amount,
            request.trail_percent,
            request.activation_price,
            reference_price,
        )?;
        info!(
            order_id = %order.id(),
            symbol = %order.symbol(),
            stop = %order.current_stop_price(),
            "created trailing stop order"
        );
        let snapshot = order.clone();
        self.register(AdvancedOrder::TrailingStop(order)).await?;
        Ok(snapshot)
    }

    /// Create and register an iceberg order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad request.
    pub async fn create_iceberg(
        &self,
        request: CreateIcebergRequest,
    ) -> Result<IcebergOrder, OrderError> {
        let order = order_factory::create_iceberg(
            Symbol::new(&request.symbol),
            request.side,
            Quantity::new(request.total_quantity),
            Quantity::new(request.display_quantity),
            request.randomize_slices,
            request.time_interval_ms,
        )?;
        info!(
            order_id = %order.id(),
            symbol = %order.symbol(),
            slices = order.slices().len(),
            "created iceberg order"
        );
        let snapshot = order.clone();
        self.register(AdvancedOrder::Iceberg(order)).await?;
        Ok(snapshot)
    }

    /// Cancel an order by id.
    ///
    /// Idempotent: an unknown id or an already terminal order is reported in
    /// the response, not as an error. Cancellation serializes with any
    /// in-flight evaluation for the same symbol, so an order observed open
    /// here cannot be concurrently filling.
    pub async fn cancel(&self, order_id: &OrderId) -> CancelResponse {
        let symbol = self.symbol_index.read().await.get(order_id).cloned();
        let Some(symbol) = symbol else {
            return CancelResponse {
                order_id: order_id.clone(),
                found: false,
                cancelled: false,
            };
        };

        let shard = self.shard(&symbol).await;
        let now = Timestamp::now();
        let outcome = shard.lock().await.cancel(order_id, now);
        match outcome {
            CancelOutcome::Cancelled => {
                info!(order_id = %order_id, symbol = %symbol, "cancelled order");
                self.publish(OrderEvent::OrderCancelled {
                    order_id: order_id.clone(),
                    symbol,
                    occurred_at: now,
                });
                CancelResponse {
                    order_id: order_id.clone(),
                    found: true,
                    cancelled: true,
                }
            }
            CancelOutcome::AlreadyTerminal => CancelResponse {
                order_id: order_id.clone(),
                found: true,
                cancelled: false,
            },
            CancelOutcome::NotFound => CancelResponse {
                order_id: order_id.clone(),
                found: false,
                cancelled: false,
            },
        }
    }

    /// Snapshot every registered order across all symbols.
    pub async fn get_all_orders(&self) -> OrdersSnapshot {
        let shards: Vec<_> = self.shards.read().await.values().cloned().collect();
        let mut snapshot = OrdersSnapshot::default();
        for shard in shards {
            let registry = shard.lock().await;
            snapshot.oco.extend_from_slice(registry.ocos());
            snapshot.bracket.extend_from_slice(registry.brackets());
            snapshot
                .trailing_stop
                .extend_from_slice(registry.trailing_stops());
            snapshot.iceberg.extend_from_slice(registry.icebergs());
        }
        snapshot
    }

    /// Last observed market price for a symbol.
    pub async fn last_price(&self, symbol: &Symbol) -> Option<Decimal> {
        self.last_prices.read().await.get(symbol).copied()
    }

    async fn register(&self, order: AdvancedOrder) -> Result<(), OrderError> {
        let symbol = order.symbol().clone();
        let order_id = order.id().clone();
        let shard = self.shard(&symbol).await;
        shard.lock().await.insert(order)?;
        self.symbol_index.write().await.insert(order_id, symbol);
        Ok(())
    }

    async fn shard(&self, symbol: &Symbol) -> Arc<Mutex<OrderRegistry>> {
        if let Some(shard) = self.shards.read().await.get(symbol) {
            return shard.clone();
        }
        self.shards
            .write()
            .await
            .entry(symbol.clone())
            .or_insert_with(|| Arc::new(Mutex::new(OrderRegistry::new())))
            .clone()
    }

    fn publish(&self, event: OrderEvent) {
        match self.events_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(
                    event_type = event.event_type(),
                    order_id = %event.order_id(),
                    "event channel full, dropping event"
                );
            }
            Err(TrySendError::Closed(event)) => {
                warn!(
                    event_type = event.event_type(),
                    order_id = %event.order_id(),
                    "event channel closed, dropping event"
                );
            }
        }
    }
}

fn leg_spec(leg: &crate::application::dto::OcoLegRequest) -> OcoLegSpec {
    OcoLegSpec {
        kind: leg.kind,
        price: leg.price,
        stop_price: leg.stop_price,
        limit_price: leg.limit_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advanced_orders::value_objects::{EntryKind, LegKind, OrderSide};
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    fn dispatcher(capacity: usize) -> (MonitoringDispatcher, mpsc::Receiver<OrderEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (MonitoringDispatcher::new(tx), rx)
    }

    fn oco_request(symbol: &str) -> CreateOcoRequest {
        CreateOcoRequest {
            symbol: symbol.to_string(),
            side: OrderSide::Sell,
            quantity: dec!(2),
            leg1: crate::application::dto::OcoLegRequest {
                kind: LegKind::Limit,
                price: Some(dec!(3200)),
                stop_price: None,
                limit_price: None,
            },
            leg2: crate::application::dto::OcoLegRequest {
                kind: LegKind::StopMarket,
                price: None,
                stop_price: Some(dec!(2900)),
                limit_price: None,
            },
        }
    }

    #[tokio::test]
    async fn price_update_fills_oco_and_emits_event() {
        let (dispatcher, mut rx) = dispatcher(16);
        let order = dispatcher.create_oco(oco_request("ETHUSDT")).await.unwrap();

        let emitted = dispatcher
            .on_price_update(Symbol::new("ETHUSDT"), dec!(3250), Timestamp::now())
            .await
            .unwrap();
        assert_eq!(emitted, 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type(), "OCO_FILLED");
        assert_eq!(event.order_id(), order.id());
    }

    #[tokio::test]
    async fn updates_for_other_symbols_do_not_touch_orders() {
        let (dispatcher, mut rx) = dispatcher(16);
        dispatcher.create_oco(oco_request("ETHUSDT")).await.unwrap();

        let emitted = dispatcher
            .on_price_update(Symbol::new("BTCUSDT"), dec!(3250), Timestamp::now())
            .await
            .unwrap();
        assert_eq!(emitted, 0);
        assert!(rx.try_recv().is_err());

        let snapshot = dispatcher.get_all_orders().await;
        assert!(snapshot.oco[0].is_open());
    }

    #[tokio::test]
    async fn rejects_non_positive_price() {
        let (dispatcher, _rx) = dispatcher(16);
        let err = dispatcher
            .on_price_update(Symbol::new("ETHUSDT"), dec!(0), Timestamp::now())
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn cancel_unknown_id_reports_not_found() {
        let (dispatcher, _rx) = dispatcher(16);
        let response = dispatcher.cancel(&OrderId::generate()).await;
        assert!(!response.found);
        assert!(!response.cancelled);
    }

    #[tokio::test]
    async fn cancel_is_idempotent_and_emits_once() {
        let (dispatcher, mut rx) = dispatcher(16);
        let order = dispatcher.create_oco(oco_request("ETHUSDT")).await.unwrap();

        let first = dispatcher.cancel(order.id()).await;
        assert!(first.found && first.cancelled);
        let second = dispatcher.cancel(order.id()).await;
        assert!(second.found && !second.cancelled);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type(), "ORDER_CANCELLED");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn trailing_stop_falls_back_to_last_observed_price() {
        let (dispatcher, _rx) = dispatcher(16);
        dispatcher
            .on_price_update(Symbol::new("BTCUSDT"), dec!(50000), Timestamp::now())
            .await
            .unwrap();

        let order = dispatcher
            .create_trailing_stop(CreateTrailingStopRequest {
                symbol: "BTCUSDT".to_string(),
                side: OrderSide::Buy,
                quantity: dec!(1),
                trail_amount: None,
                trail_percent: Some(dec!(2)),
                activation_price: None,
                reference_price: None,
            })
            .await
            .unwrap();
        assert_eq!(order.peak_price(), dec!(50000));
        assert_eq!(order.current_stop_price(), dec!(49000.00));
    }

    #[tokio::test]
    async fn trailing_stop_without_any_reference_is_rejected() {
        let (dispatcher, _rx) = dispatcher(16);
        let err = dispatcher
            .create_trailing_stop(CreateTrailingStopRequest {
                symbol: "BTCUSDT".to_string(),
                side: OrderSide::Buy,
                quantity: dec!(1),
                trail_amount: Some(dec!(500)),
                trail_percent: None,
                activation_price: None,
                reference_price: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn full_channel_drops_events_without_stalling() {
        let (dispatcher, mut rx) = dispatcher(1);
        dispatcher
            .create_iceberg(CreateIcebergRequest {
                symbol: "BTCUSDT".to_string(),
                side: OrderSide::Buy,
                total_quantity: dec!(2),
                display_quantity: dec!(1),
                randomize_slices: false,
                time_interval_ms: 0,
            })
            .await
            .unwrap();

        // The final update produces two events (slice + completion) into a
        // channel of capacity one: the second is dropped, evaluation is not.
        dispatcher
            .on_price_update(Symbol::new("BTCUSDT"), dec!(100), Timestamp::now())
            .await
            .unwrap();
        let first = rx.recv().await.unwrap();
        assert_eq!(first.event_type(), "ICEBERG_SLICE_FILLED");

        let emitted = dispatcher
            .on_price_update(Symbol::new("BTCUSDT"), dec!(100), Timestamp::now())
            .await
            .unwrap();
        assert_eq!(emitted, 2);

        let snapshot = dispatcher.get_all_orders().await;
        assert_eq!(
            snapshot.iceberg[0].executed_quantity(),
            snapshot.iceberg[0].total_quantity()
        );
    }

    #[tokio::test]
    async fn bracket_lifecycle_through_dispatcher() {
        let (dispatcher, mut rx) = dispatcher(16);
        dispatcher
            .create_bracket(CreateBracketRequest {
                symbol: "ETHUSDT".to_string(),
                side: OrderSide::Buy,
                quantity: dec!(1),
                entry_kind: EntryKind::Limit,
                entry_price: Some(dec!(3000)),
                stop_loss_price: dec!(2900),
                take_profit_price: dec!(3200),
            })
            .await
            .unwrap();

        dispatcher
            .on_price_update(Symbol::new("ETHUSDT"), dec!(3000), Timestamp::now())
            .await
            .unwrap();
        assert_eq!(rx.recv().await.unwrap().event_type(), "BRACKET_ENTRY_FILLED");

        dispatcher
            .on_price_update(Symbol::new("ETHUSDT"), dec!(3200), Timestamp::now())
            .await
            .unwrap();
        assert_eq!(rx.recv().await.unwrap().event_type(), "BRACKET_EXIT_FILLED");
    }
}
