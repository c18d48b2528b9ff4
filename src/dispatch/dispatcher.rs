use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::future::join_all;
use tracing::{info, warn};

use crate::dispatch::NotificationTransport;
use crate::dispatch::delivery_report::{DeliveryOutcome, DeliveryReport};
use crate::error::DeliveryError;
use crate::notify::message::NotificationPayload;
use crate::registry::webhook_url::abbreviate;

pub struct Dispatcher {
    transport: Arc<dyn NotificationTransport>,
    attempt_timeout: Duration,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn NotificationTransport>, attempt_timeout: Duration) -> Self {
        Self {
            transport,
            attempt_timeout,
        }
    }

    /// One attempt per destination, all in flight together, each bounded by
    /// the attempt timeout. A failing destination never affects the others.
    ///
    /// Only payload serialization can fail the call as a whole.
    pub async fn dispatch(
        &self,
        payload: &NotificationPayload,
        destinations: &[String],
    ) -> Result<DeliveryReport> {
        let body = serde_json::to_vec(payload).context("failed to serialize notification payload")?;

        let attempts = destinations.iter().map(|destination| {
            let body = body.as_slice();
            async move {
                let result = match tokio::time::timeout(
                    self.attempt_timeout,
                    self.transport.deliver(destination, body),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(DeliveryError::Timeout(self.attempt_timeout)),
                };

                match &result {
                    Ok(()) => info!(destination = %abbreviate(destination), "notification delivered"),
                    Err(error) => {
                        warn!(destination = %abbreviate(destination), %error, "notification delivery failed")
                    }
                }

                DeliveryOutcome {
                    destination: destination.clone(),
                    result,
                }
            }
        });

        let report = DeliveryReport::from_outcomes(join_all(attempts).await);

        info!(
            succeeded = report.succeeded,
            attempted = report.attempted(),
            "dispatch complete"
        );

        Ok(report)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}
