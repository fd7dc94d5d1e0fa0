//! Sink that writes events to the structured log.

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::NotificationSinkPort;
use crate::domain::advanced_orders::OrderEvent;

/// Delivers events as structured log lines. Stands in for a real fan-out
/// channel in development and in the test harness.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSinkPort for LogNotificationSink {
    async fn deliver(&self, event: &OrderEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(event)?;
        info!(
            target: "order_events",
            event_type = event.event_type(),
            order_id = %event.order_id(),
            symbol = %event.symbol(),
            payload,
            "order event"
        );
        Ok(())
    }
}
