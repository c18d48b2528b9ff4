use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::dispatch::NotificationTransport;
use crate::error::DeliveryError;

#[derive(Clone, Debug)]
pub struct WebhookTransport {
    http: reqwest::Client,
    timeout: Duration,
}

impl WebhookTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build webhook http client")?;

        Ok(Self { http, timeout })
    }
}

#[async_trait]
impl NotificationTransport for WebhookTransport {
    async fn deliver(&self, destination: &str, body: &[u8]) -> Result<(), DeliveryError> {
        let resp = self
            .http
            .post(destination)
            .header("Content-Type", "application/json")
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout(self.timeout)
                } else {
                    DeliveryError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
