//! Bounded event channel and the forwarder task that drains it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::application::ports::NotificationSinkPort;
use crate::domain::advanced_orders::OrderEvent;

/// Create the bounded channel connecting the dispatcher to a forwarder.
#[must_use]
pub fn event_channel(capacity: usize) -> (mpsc::Sender<OrderEvent>, mpsc::Receiver<OrderEvent>) {
    mpsc::channel(capacity)
}

/// Spawn a task that drains the channel into the sink.
///
/// A delivery failure is logged and the event dropped; the task keeps
/// draining. The task finishes when every sender is gone and the channel is
/// empty.
pub fn spawn_forwarder(
    mut events_rx: mpsc::Receiver<OrderEvent>,
    sink: Arc<dyn NotificationSinkPort>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            if let Err(err) = sink.deliver(&event).await {
                warn!(
                    event_type = event.event_type(),
                    order_id = %event.order_id(),
                    error = %err,
                    "failed to deliver order event"
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{OrderId, Symbol, Timestamp};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        delivered: Mutex<Vec<String>>,
        fail_first: Mutex<bool>,
    }

    #[async_trait]
    impl NotificationSinkPort for RecordingSink {
        async fn deliver(&self, event: &OrderEvent) -> anyhow::Result<()> {
            let mut fail = self.fail_first.lock().await;
            if *fail {
                *fail = false;
                anyhow::bail!("sink unavailable");
            }
            drop(fail);
            self.delivered
                .lock()
                .await
                .push(event.event_type().to_string());
            Ok(())
        }
    }

    fn cancelled_event() -> OrderEvent {
        OrderEvent::OrderCancelled {
            order_id: OrderId::generate(),
            symbol: Symbol::new("BTCUSDT"),
            occurred_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn forwarder_drains_events_in_order() {
        let (tx, rx) = event_channel(8);
        let sink = Arc::new(RecordingSink::default());
        let handle = spawn_forwarder(rx, sink.clone());

        tx.send(cancelled_event()).await.unwrap();
        tx.send(cancelled_event()).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        let delivered = sink.delivered.lock().await;
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0], "ORDER_CANCELLED");
    }

    #[tokio::test]
    async fn forwarder_survives_delivery_failure() {
        let (tx, rx) = event_channel(8);
        let sink = Arc::new(RecordingSink {
            delivered: Mutex::new(Vec::new()),
            fail_first: Mutex::new(true),
        });
        let handle = spawn_forwarder(rx, sink.clone());

        tx.send(cancelled_event()).await.unwrap();
        tx.send(cancelled_event()).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        // The first event was dropped, the second still delivered.
        assert_eq!(sink.delivered.lock().await.len(), 1);
    }
}
