use std::sync::Arc;

use crate::fetch::StockFetcher;
use crate::monitor::monitor_loop::MonitorLoop;
use crate::registry::endpoint_registry::EndpointRegistry;

#[derive(Clone)]
pub struct AppState {
    pub monitor: Arc<MonitorLoop>,
    pub fetcher: Arc<dyn StockFetcher>,
    pub webhook_prefix: Arc<str>,
}

impl AppState {
    pub fn registry(&self) -> &Arc<EndpointRegistry> {
        self.monitor.state().registry()
    }

    pub fn check_interval(&self) -> String {
        format!("{} seconds", self.monitor.interval().as_secs())
    }
}
