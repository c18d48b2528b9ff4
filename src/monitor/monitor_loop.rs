use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::dispatch::delivery_report::DeliveryReport;
use crate::dispatch::dispatcher::Dispatcher;
use crate::error::{FetchError, MonitorError};
use crate::fetch::StockFetcher;
use crate::monitor::monitor_state::{MonitorPhase, MonitorState, StatusReport};
use crate::notify::message::NotificationPayload;
use crate::notify::notification_builder::NotificationBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

#[derive(Debug)]
pub enum TickOutcome {
    FetchFailed(FetchError),
    EmptySnapshot,
    Unchanged,
    Dispatched(DeliveryReport),
}

pub struct MonitorLoop {
    state: Arc<MonitorState>,
    fetcher: Arc<dyn StockFetcher>,
    builder: NotificationBuilder,
    dispatcher: Dispatcher,
    interval: Duration,
}

impl MonitorLoop {
    pub fn new(
        state: Arc<MonitorState>,
        fetcher: Arc<dyn StockFetcher>,
        builder: NotificationBuilder,
        dispatcher: Dispatcher,
        interval: Duration,
    ) -> Self {
        Self {
            state,
            fetcher,
            builder,
            dispatcher,
            interval,
        }
    }

    pub fn state(&self) -> &Arc<MonitorState> {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn status(&self) -> StatusReport {
        self.state.status()
    }

    /// Spawns the background loop unless one is already running. Starting
    /// from a faulted state is how the loop gets restarted.
    pub fn start_if_stopped(self: &Arc<Self>) -> StartOutcome {
        let mut control = self.state.control();
        if control.phase.is_running() {
            return StartOutcome::AlreadyRunning;
        }

        let shutdown = CancellationToken::new();
        control.generation += 1;
        control.shutdown = Some(shutdown.clone());
        control.phase = MonitorPhase::Running { since: Utc::now() };
        let generation = control.generation;
        drop(control);

        info!(interval = ?self.interval, "starting stock monitor");

        let run = tokio::spawn(self.clone().run(shutdown));
        let state = self.state.clone();
        tokio::spawn(async move {
            let fault = match run.await {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(MonitorError::Fatal(format!("{e:#}"))),
                Err(join_error) if join_error.is_panic() => {
                    Some(MonitorError::Fatal(panic_message(join_error.into_panic())))
                }
                Err(join_error) => Some(MonitorError::Fatal(join_error.to_string())),
            };

            match &fault {
                Some(error) => error!(%error, "stock monitor stopped"),
                None => info!("stock monitor stopped"),
            }

            state.finish(generation, fault);
        });

        StartOutcome::Started
    }

    /// Returns whether a running loop was signalled.
    pub fn stop(&self) -> bool {
        let mut control = self.state.control();
        let Some(shutdown) = control.shutdown.take() else {
            return false;
        };

        shutdown.cancel();
        control.phase = MonitorPhase::Stopped;

        true
    }

    async fn run(self: Arc<Self>, shutdown: CancellationToken) -> Result<()> {
        loop {
            let tick = self.state.next_tick();
            debug!(tick, "checking stock");

            tokio::select! {
                _ = shutdown.cancelled() => return Ok(()),
                outcome = self.tick() => {
                    log_tick(tick, &outcome?);
                }
            }

            tokio::select! {
                _ = shutdown.cancelled() => return Ok(()),
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// One fetch, detect, build, dispatch pass. Errors are internal faults;
    /// fetch and delivery failures are part of the outcome.
    pub async fn tick(&self) -> Result<TickOutcome> {
        let snapshot = match self.fetcher.fetch().await {
            Ok(snapshot) => snapshot,
            Err(error) => return Ok(TickOutcome::FetchFailed(error)),
        };

        if snapshot.is_empty() {
            return Ok(TickOutcome::EmptySnapshot);
        }

        if !self.state.detector().has_changed(&snapshot) {
            return Ok(TickOutcome::Unchanged);
        }

        let groups = self.builder.build(&snapshot, Utc::now());
        let payload = NotificationPayload::new(self.builder.sender(), groups);
        let destinations = self.state.registry().list();

        let report = self.dispatcher.dispatch(&payload, &destinations).await?;

        Ok(TickOutcome::Dispatched(report))
    }
}

fn log_tick(tick: u64, outcome: &TickOutcome) {
    match outcome {
        TickOutcome::FetchFailed(error) => warn!(tick, %error, "unable to fetch stock, skipping"),
        TickOutcome::EmptySnapshot => warn!(tick, "stock source returned no data, skipping"),
        TickOutcome::Unchanged => info!(tick, "no stock change"),
        TickOutcome::Dispatched(report) if report.is_success() => info!(
            tick,
            succeeded = report.succeeded,
            attempted = report.attempted(),
            "stock change notified"
        ),
        TickOutcome::Dispatched(report) => warn!(
            tick,
            attempted = report.attempted(),
            failures = ?report.failures().map(|(_, error)| error.to_string()).collect::<Vec<_>>(),
            "stock changed but no webhook accepted the notification"
        ),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
