use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::detect::change_detector::ChangeDetector;
use crate::error::MonitorError;
use crate::registry::endpoint_registry::EndpointRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorPhase {
    Stopped,
    Running { since: DateTime<Utc> },
    Faulted { error: MonitorError, at: DateTime<Utc> },
}

impl MonitorPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub phase: MonitorPhase,
    pub ticks: u64,
    pub endpoints: usize,
}

impl StatusReport {
    pub fn is_active(&self) -> bool {
        self.phase.is_running()
    }

    pub fn fault(&self) -> Option<&MonitorError> {
        match &self.phase {
            MonitorPhase::Faulted { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct LoopControl {
    pub phase: MonitorPhase,
    pub shutdown: Option<CancellationToken>,
    /// Bumped on every start so a finished loop cannot overwrite the phase of
    /// its successor.
    pub generation: u64,
}

/// Process-wide monitor state, created empty at startup and shared by handle
/// between the loop and the request surface. Nothing here is persisted.
#[derive(Debug)]
pub struct MonitorState {
    detector: ChangeDetector,
    registry: Arc<EndpointRegistry>,
    control: Mutex<LoopControl>,
    ticks: AtomicU64,
}

impl MonitorState {
    pub fn new(registry: Arc<EndpointRegistry>) -> Self {
        Self {
            detector: ChangeDetector::new(),
            registry,
            control: Mutex::new(LoopControl {
                phase: MonitorPhase::Stopped,
                shutdown: None,
                generation: 0,
            }),
            ticks: AtomicU64::new(0),
        }
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    pub fn registry(&self) -> &Arc<EndpointRegistry> {
        &self.registry
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            phase: self.control().phase.clone(),
            ticks: self.ticks.load(Ordering::Relaxed),
            endpoints: self.registry.count(),
        }
    }

    pub(crate) fn next_tick(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn control(&self) -> MutexGuard<'_, LoopControl> {
        self.control
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records how a loop generation ended, unless a newer one has started.
    pub(crate) fn finish(&self, generation: u64, fault: Option<MonitorError>) {
        let mut control = self.control();
        if control.generation != generation {
            return;
        }

        control.shutdown = None;
        control.phase = match fault {
            Some(error) => MonitorPhase::Faulted {
                error,
                at: Utc::now(),
            },
            None => MonitorPhase::Stopped,
        };
    }
}
