//! Queue consumer loop — the hosting boundary for worker invocations.
//!
//! Pops one message at a time from the notification queue and runs a full
//! invocation for it. Popping is the acknowledgment: a failed invocation is
//! still consumed, and the failure is visible only in the logs and in the
//! notification row's unset `completed_date`. No retry, no dead-lettering.

use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use techconf_common::config::Settings;

use crate::dispatcher;

/// Seconds a blocking pop waits before returning empty, so shutdown stays
/// responsive.
const POP_TIMEOUT_SECS: f64 = 5.0;

/// Consumes the notification queue and runs one invocation per message.
pub struct QueueConsumer {
    redis: ConnectionManager,
    queue_name: String,
    settings: Settings,
}

impl QueueConsumer {
    pub fn new(redis: ConnectionManager, queue_name: impl Into<String>, settings: Settings) -> Self {
        Self {
            redis,
            queue_name: queue_name.into(),
            settings,
        }
    }

    /// Run the consume loop indefinitely until the task is cancelled.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        tracing::info!(queue = %self.queue_name, "Queue consumer started");

        loop {
            let popped: Option<(String, String)> = match self
                .redis
                .blpop(&self.queue_name, POP_TIMEOUT_SECS)
                .await
            {
                Ok(popped) => popped,
                Err(e) => {
                    // Broker hiccup — wait and retry rather than dying.
                    tracing::warn!(error = %e, "Queue pop failed, retrying...");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    continue;
                }
            };

            let Some((_, body)) = popped else {
                continue;
            };

            // The typed invocation result stops here: one bad message must
            // never take down the consumer, so both arms log and move on.
            match dispatcher::process_message(&self.settings, &body).await {
                Ok(outcome) => tracing::info!(
                    notification_id = outcome.notification_id,
                    attendees = outcome.attendees_notified,
                    "Invocation succeeded"
                ),
                Err(e) => tracing::error!(
                    kind = e.kind(),
                    error = %e,
                    "Invocation failed"
                ),
            }
        }
    }
}
