//! Outbound port for delivering order events to clients.

use async_trait::async_trait;

use crate::domain::advanced_orders::OrderEvent;

/// Delivers order events to some outside channel (websocket fan-out, message
/// bus, log).
///
/// Delivery is best-effort: callers treat failures as droppable, never as a
/// reason to roll back the order state change that produced the event.
#[async_trait]
pub trait NotificationSinkPort: Send + Sync {
    /// Deliver one event.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying channel rejects the event.
    async fn deliver(&self, event: &OrderEvent) -> anyhow::Result<()>;
}

/// Sink that discards every event. Useful in tests and as a default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotificationSink;

#[async_trait]
impl NotificationSinkPort for NoOpNotificationSink {
    async fn deliver(&self, _event: &OrderEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{OrderId, Symbol, Timestamp};

    #[tokio::test]
    async fn noop_sink_accepts_everything() {
        let sink = NoOpNotificationSink;
        let event = OrderEvent::OrderCancelled {
            order_id: OrderId::generate(),
            symbol: Symbol::new("BTCUSDT"),
            occurred_at: Timestamp::now(),
        };
        assert!(sink.deliver(&event).await.is_ok());
    }
}
