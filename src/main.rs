mod api;
mod config;
mod detect;
mod dispatch;
mod error;
mod fetch;
mod monitor;
mod notify;
mod registry;
mod types;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::app_state::AppState;
use crate::api::router::build_router;
use crate::config::monitor_config::MonitorConfig;
use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::webhook_transport::WebhookTransport;
use crate::fetch::http_fetcher::HttpStockFetcher;
use crate::monitor::monitor_loop::MonitorLoop;
use crate::monitor::monitor_state::MonitorState;
use crate::notify::notification_builder::NotificationBuilder;
use crate::notify::section_catalog::SectionCatalog;
use crate::registry::endpoint_registry::EndpointRegistry;

#[derive(Debug, Clone, Parser)]
struct Args {
    #[arg(long, default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    #[arg(long, default_value_t = 30)]
    pub interval_secs: u64,

    #[arg(long, default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    #[arg(long, default_value_t = 10)]
    pub delivery_timeout_secs: u64,

    /// YAML section catalog replacing the built-in one.
    #[arg(long)]
    pub sections: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("stock_monitor=debug".parse()?),
        )
        .with_target(false)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    if args.interval_secs == 0 {
        anyhow::bail!("--interval-secs must be > 0");
    }

    let config = MonitorConfig::from_env()?;
    let catalog = match &args.sections {
        Some(path) => SectionCatalog::load(path)?,
        None => SectionCatalog::builtin(),
    };

    let fetcher = Arc::new(HttpStockFetcher::new(
        config.source_url.clone(),
        Duration::from_secs(args.fetch_timeout_secs),
    )?);
    let transport = Arc::new(WebhookTransport::new(Duration::from_secs(
        args.delivery_timeout_secs,
    ))?);

    let registry = Arc::new(EndpointRegistry::new());
    let monitor = Arc::new(MonitorLoop::new(
        Arc::new(MonitorState::new(registry)),
        fetcher.clone(),
        NotificationBuilder::new(catalog, config.sender.clone()),
        Dispatcher::new(transport, Duration::from_secs(args.delivery_timeout_secs)),
        Duration::from_secs(args.interval_secs),
    ));

    let state = AppState {
        monitor: monitor.clone(),
        fetcher,
        webhook_prefix: Arc::from(config.webhook_prefix.as_str()),
    };

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    info!(
        bind = %args.bind,
        source = %config.source_url,
        interval_secs = args.interval_secs,
        "stock monitor api listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                warn!(%error, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutdown requested");
        })
        .await
        .context("http server failed")?;

    monitor.stop();

    Ok(())
}
