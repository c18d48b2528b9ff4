use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("stock source request failed: {0}")]
    Transport(String),

    #[error("stock source returned http {status}")]
    Status { status: u16 },

    #[error("stock source returned invalid json: {0}")]
    Decode(String),

    #[error("stock source did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("webhook URL is required")]
    Missing,

    #[error("invalid webhook URL: {0}")]
    InvalidUrl(String),

    #[error("webhook URL must start with {expected_prefix}")]
    WrongPrefix { expected_prefix: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("delivery request failed: {0}")]
    Transport(String),

    #[error("destination rejected payload with http {status}")]
    Status { status: u16 },

    #[error("destination did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("webhook not found")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    #[error("monitor loop faulted: {0}")]
    Fatal(String),
}
