pub mod http_fetcher;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::stock_snapshot::StockSnapshot;

#[async_trait]
pub trait StockFetcher: Send + Sync {
    /// Retrieves the current upstream stock. Failures are reported, never
    /// panicked, and callers treat them as "no data this tick".
    async fn fetch(&self) -> Result<StockSnapshot, FetchError>;
}
