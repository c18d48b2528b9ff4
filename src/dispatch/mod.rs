pub mod delivery_report;
pub mod dispatcher;
pub mod webhook_transport;

use async_trait::async_trait;

use crate::error::DeliveryError;

#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Makes exactly one delivery attempt of an already serialized payload.
    async fn deliver(&self, destination: &str, body: &[u8]) -> Result<(), DeliveryError>;
}
