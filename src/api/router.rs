use axum::Router;
use axum::routing::get;

use crate::api::app_state::AppState;
use crate::api::handlers::{
    current_stock_handler, index_handler, list_webhooks_handler, remove_webhook_handler,
    status_handler, subscribe_handler,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/status", get(status_handler))
        .route("/api/stock/subscribe", get(subscribe_handler))
        .route("/api/stock/current", get(current_stock_handler))
        .route("/api/webhooks", get(list_webhooks_handler))
        .route("/api/webhooks/remove", get(remove_webhook_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::dispatch::dispatcher::Dispatcher;
    use crate::error::FetchError;
    use crate::monitor::monitor_loop::MonitorLoop;
    use crate::monitor::monitor_state::MonitorState;
    use crate::registry::endpoint_registry::EndpointRegistry;
    use crate::test_support::{RecordingTransport, ScriptedFetcher, test_builder};
    use crate::types::stock_snapshot::StockSnapshot;

    const HOOK: &str = "https://discord.com/api/webhooks/1/token";

    fn app_state(fetcher: Arc<ScriptedFetcher>) -> AppState {
        let registry = Arc::new(EndpointRegistry::new());
        let state = Arc::new(MonitorState::new(registry));
        let transport = Arc::new(RecordingTransport::default());
        let monitor = MonitorLoop::new(
            state,
            fetcher.clone(),
            test_builder(),
            Dispatcher::new(transport, Duration::from_secs(5)),
            Duration::from_secs(30),
        );

        AppState {
            monitor: Arc::new(monitor),
            fetcher,
            webhook_prefix: Arc::from("https://discord.com/api/webhooks/"),
        }
    }

    async fn get_json(state: &AppState, uri: &str) -> (StatusCode, Value) {
        let response = build_router(state.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn subscribe_registers_and_starts_monitoring() {
        let state = app_state(Arc::new(ScriptedFetcher::changing()));

        let (status, body) = get_json(&state, &format!("/api/stock/subscribe?webhook={HOOK}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "🚀 Stock monitoring started!");
        assert_eq!(body["webhook_added"], HOOK);
        assert_eq!(body["already_registered"], false);
        assert_eq!(body["total_webhooks"], 1);
        assert_eq!(body["check_interval"], "30 seconds");

        let (_, body) = get_json(&state, &format!("/api/stock/subscribe?webhook={HOOK}")).await;
        assert_eq!(body["message"], "✅ Webhook added to existing monitoring");
        assert_eq!(body["already_registered"], true);
        assert_eq!(body["total_webhooks"], 1);

        let (_, body) = get_json(&state, "/status").await;
        assert_eq!(body["monitoring_active"], true);
        assert_eq!(body["total_webhooks"], 1);
        assert_eq!(body["fault"], Value::Null);

        state.monitor.stop();
    }

    #[tokio::test]
    async fn subscribe_rejects_foreign_url() {
        let state = app_state(Arc::new(ScriptedFetcher::changing()));

        let (status, _) =
            get_json(&state, "/api/stock/subscribe?webhook=https://example.com/hook").await;
        let (missing, _) = get_json(&state, "/api/stock/subscribe").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(missing, StatusCode::BAD_REQUEST);
        assert_eq!(state.registry().count(), 0);
        assert!(!state.monitor.status().is_active());
    }

    #[tokio::test]
    async fn list_and_remove_webhooks() {
        let state = app_state(Arc::new(ScriptedFetcher::changing()));
        state.registry().add(HOOK);

        let (_, body) = get_json(&state, "/api/webhooks").await;
        assert_eq!(body["webhooks"], json!([HOOK]));
        assert_eq!(body["total_count"], 1);
        assert_eq!(body["monitoring_active"], false);

        let (status, body) = get_json(&state, &format!("/api/webhooks/remove?webhook={HOOK}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["webhook_removed"], HOOK);
        assert_eq!(body["remaining_webhooks"], 0);

        let (status, body) = get_json(&state, &format!("/api/webhooks/remove?webhook={HOOK}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "webhook not found");
    }

    #[tokio::test]
    async fn current_stock_passes_snapshot_through() {
        let stock = json!({ "normal_stock": { "items": [{ "name": "Spin" }] } });
        let state = app_state(Arc::new(ScriptedFetcher::new(vec![
            Ok(StockSnapshot::new(stock.clone())),
            Err(FetchError::Status { status: 500 }),
        ])));

        let (status, body) = get_json(&state, "/api/stock/current").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, stock);

        let (status, _) = get_json(&state, "/api/stock/current").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn index_reports_inactive_before_registration() {
        let state = app_state(Arc::new(ScriptedFetcher::changing()));

        let (status, body) = get_json(&state, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "inactive");
    }
}
