use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use crate::dispatch::NotificationTransport;
use crate::error::{DeliveryError, FetchError};
use crate::fetch::StockFetcher;
use crate::notify::message::SenderProfile;
use crate::notify::notification_builder::NotificationBuilder;
use crate::notify::section_catalog::SectionCatalog;
use crate::types::stock_snapshot::StockSnapshot;

pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn test_builder() -> NotificationBuilder {
    NotificationBuilder::new(
        SectionCatalog::builtin(),
        SenderProfile {
            name: "Test Monitor".to_string(),
            avatar_url: None,
        },
    )
}

enum Script {
    Queue(Mutex<VecDeque<Result<StockSnapshot, FetchError>>>),
    Changing,
    Panicking,
}

pub struct ScriptedFetcher {
    script: Script,
    calls: AtomicU64,
}

impl ScriptedFetcher {
    /// Replays `results` in order, then reports the source as unreachable.
    pub fn new(results: Vec<Result<StockSnapshot, FetchError>>) -> Self {
        Self::with_script(Script::Queue(Mutex::new(results.into())))
    }

    /// Every call returns stock that differs from the previous call.
    pub fn changing() -> Self {
        Self::with_script(Script::Changing)
    }

    pub fn panicking() -> Self {
        Self::with_script(Script::Panicking)
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicU64::new(0),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StockFetcher for ScriptedFetcher {
    async fn fetch(&self) -> Result<StockSnapshot, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        match &self.script {
            Script::Queue(queue) => queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_string()))),
            Script::Changing => Ok(StockSnapshot::new(json!({
                "normal_stock": { "items": [{ "name": format!("Fruit {call}"), "usd_price": call }] }
            }))),
            Script::Panicking => panic!("stock source exploded"),
        }
    }
}

#[derive(Default)]
pub struct RecordingTransport {
    failing: HashSet<String>,
    stalling: HashSet<String>,
    deliveries: Mutex<Vec<(String, String)>>,
}

impl RecordingTransport {
    pub fn failing(destinations: &[&str]) -> Self {
        Self {
            failing: destinations.iter().map(|d| d.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn stalling(destinations: &[&str]) -> Self {
        Self {
            stalling: destinations.iter().map(|d| d.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn attempted_destinations(&self) -> Vec<String> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .map(|(destination, _)| destination.clone())
            .collect()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationTransport for RecordingTransport {
    async fn deliver(&self, destination: &str, body: &[u8]) -> Result<(), DeliveryError> {
        self.deliveries.lock().unwrap().push((
            destination.to_string(),
            String::from_utf8_lossy(body).into_owned(),
        ));

        if self.stalling.contains(destination) {
            std::future::pending::<()>().await;
        }

        if self.failing.contains(destination) {
            return Err(DeliveryError::Status { status: 500 });
        }

        Ok(())
    }
}
