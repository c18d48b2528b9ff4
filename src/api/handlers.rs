use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::api::api_error::ApiError;
use crate::api::app_state::AppState;
use crate::error::ValidationError;
use crate::monitor::monitor_loop::StartOutcome;
use crate::monitor::monitor_state::MonitorPhase;
use crate::registry::endpoint_registry::AddOutcome;
use crate::registry::webhook_url::{abbreviate, validate};

#[derive(Debug, Deserialize)]
pub struct WebhookQuery {
    pub webhook: Option<String>,
}

pub async fn index_handler(State(state): State<AppState>) -> Json<Value> {
    let status = if state.monitor.status().is_active() {
        "active"
    } else {
        "inactive"
    };

    Json(json!({
        "message": "🤖 Stock Monitor API",
        "status": status,
        "endpoints": {
            "/api/stock/subscribe?webhook=": "Add webhook and start monitoring",
            "/api/webhooks": "Get all registered webhooks",
            "/api/webhooks/remove?webhook=": "Remove a webhook",
            "/status": "Check monitoring status",
            "/api/stock/current": "Get current stock data"
        }
    }))
}

pub async fn subscribe_handler(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
) -> Result<Json<Value>, ApiError> {
    let webhook = validate(query.webhook.as_deref(), &state.webhook_prefix)?;

    let added = state.registry().add(webhook.clone());
    let message = match state.monitor.start_if_stopped() {
        StartOutcome::Started => "🚀 Stock monitoring started!",
        StartOutcome::AlreadyRunning => "✅ Webhook added to existing monitoring",
    };

    info!(webhook = %abbreviate(&webhook), ?added, "webhook registered");

    Ok(Json(json!({
        "message": message,
        "webhook_added": webhook,
        "already_registered": added == AddOutcome::AlreadyPresent,
        "total_webhooks": state.registry().count(),
        "check_interval": state.check_interval(),
    })))
}

pub async fn list_webhooks_handler(State(state): State<AppState>) -> Json<Value> {
    let webhooks = state.registry().list();

    Json(json!({
        "total_count": webhooks.len(),
        "webhooks": webhooks,
        "monitoring_active": state.monitor.status().is_active(),
    }))
}

pub async fn remove_webhook_handler(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
) -> Result<Json<Value>, ApiError> {
    let webhook = query
        .webhook
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .ok_or(ValidationError::Missing)?;

    state.registry().remove(webhook)?;

    info!(webhook = %abbreviate(webhook), "webhook removed");

    Ok(Json(json!({
        "message": "✅ Webhook removed successfully",
        "webhook_removed": webhook,
        "remaining_webhooks": state.registry().count(),
    })))
}

pub async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    let status = state.monitor.status();
    let message = if status.is_active() {
        "Monitoring is active"
    } else {
        "Monitoring is not active"
    };

    let (running_since, faulted_at) = match &status.phase {
        MonitorPhase::Running { since } => (Some(*since), None),
        MonitorPhase::Faulted { at, .. } => (None, Some(*at)),
        MonitorPhase::Stopped => (None, None),
    };

    Json(json!({
        "monitoring_active": status.is_active(),
        "total_webhooks": status.endpoints,
        "ticks": status.ticks,
        "message": message,
        "running_since": running_since,
        "last_fingerprint": state
            .monitor
            .state()
            .detector()
            .last_fingerprint()
            .map(|fingerprint| fingerprint.to_string()),
        "fault": status.fault().map(ToString::to_string),
        "faulted_at": faulted_at,
    }))
}

pub async fn current_stock_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let snapshot = state.fetcher.fetch().await?;

    Ok(Json(snapshot.into_value()))
}
