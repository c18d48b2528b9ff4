use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchError;
use crate::fetch::StockFetcher;
use crate::types::stock_snapshot::StockSnapshot;

#[derive(Clone, Debug)]
pub struct HttpStockFetcher {
    http: reqwest::Client,
    source_url: String,
    timeout: Duration,
}

impl HttpStockFetcher {
    pub fn new(source_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build stock source http client")?;

        Ok(Self {
            http,
            source_url: source_url.into(),
            timeout,
        })
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if error.is_decode() {
            FetchError::Decode(error.to_string())
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl StockFetcher for HttpStockFetcher {
    async fn fetch(&self) -> Result<StockSnapshot, FetchError> {
        let resp = self
            .http
            .get(&self.source_url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let text = resp.text().await.map_err(|e| self.classify(e))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(bytes = text.len(), "fetched stock snapshot");

        Ok(StockSnapshot::new(value))
    }
}
