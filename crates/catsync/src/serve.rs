// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `catsync serve` command implementation.
//!
//! Serves the Pub/Sub push subscription endpoint. Every delivery runs one
//! sync step; the response status tells Pub/Sub whether to acknowledge it.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use catsync_config::CatsyncConfig;
use catsync_core::{CatsyncError, StepError};
use catsync_engine::{StepOutcome, SyncStep};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::shutdown;
use crate::wiring;

/// Shared state for the push endpoint handlers.
#[derive(Clone)]
pub struct AppState {
    pub step: SyncStep,
    /// Renders the Prometheus text exposition, when a recorder is installed.
    pub render_metrics: Option<Arc<dyn Fn() -> String + Send + Sync>>,
}

/// Body returned for an acknowledged delivery.
#[derive(Debug, Serialize, PartialEq)]
pub struct PushResponse {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<usize>,
}

impl From<StepOutcome> for PushResponse {
    fn from(outcome: StepOutcome) -> Self {
        match outcome {
            StepOutcome::Advanced {
                next,
                published,
                failed,
            } => Self {
                outcome: outcome.label(),
                next_offset: Some(next.offset()),
                published: Some(published),
                failed: Some(failed),
            },
            StepOutcome::Completed => Self {
                outcome: outcome.label(),
                next_offset: None,
                published: None,
                failed: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Runs the `catsync serve` command until SIGINT or SIGTERM.
pub async fn run_serve(config: CatsyncConfig) -> Result<(), CatsyncError> {
    info!("starting catsync serve");

    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        CatsyncError::Internal(format!("failed to install Prometheus recorder: {e}"))
    })?;
    catsync_engine::metrics::register_metrics();

    let state = AppState {
        step: wiring::build_step(&config)?,
        render_metrics: Some(Arc::new(move || handle.render())),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CatsyncError::Server {
            message: format!("failed to bind push endpoint to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!(topic = %config.queue.topic_path(), "push endpoint listening on {addr}");

    let cancel = shutdown::install_signal_handler();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| CatsyncError::Server {
            message: format!("push endpoint error: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!("catsync serve stopped");
    Ok(())
}

/// Routes of the push endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(post_push))
        .route("/health", get(get_health))
        .route("/metrics", get(get_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /
///
/// Decode failures answer 400, every other step failure 500. Pub/Sub
/// redelivers anything it does not see acknowledged with a 2xx.
async fn post_push(State(state): State<AppState>, body: Bytes) -> Response {
    match state.step.handle_push(&body).await {
        Ok(outcome) => (StatusCode::OK, Json(PushResponse::from(outcome))).into_response(),
        Err(e) => (status_for(&e), e.to_string()).into_response(),
    }
}

/// Malformed messages are nacked with 400 and redelivered until the
/// subscription's dead-letter policy moves them aside, so configure one.
fn status_for(error: &StepError) -> StatusCode {
    match error {
        StepError::Decode(_) => StatusCode::BAD_REQUEST,
        StepError::Fetch(_) | StepError::Republish(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET /health
async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /metrics
async fn get_metrics(State(state): State<AppState>) -> Response {
    match &state.render_metrics {
        Some(render) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            render(),
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use catsync_core::SyncCursor;
    use catsync_pubsub::envelope::encode_data;
    use catsync_test_utils::{MockStack, fixtures};
    use tower::ServiceExt;

    fn app(stack: &MockStack) -> Router {
        router(AppState {
            step: SyncStep::new(
                stack.source.clone(),
                stack.sink.clone(),
                stack.notifier.clone(),
                stack.queue.clone(),
            ),
            render_metrics: Some(Arc::new(|| "catsync_steps_total 1\n".to_string())),
        })
    }

    fn push(cursor: SyncCursor) -> Request<Body> {
        let body = serde_json::json!({
            "message": {"data": encode_data(cursor), "messageId": "1"},
            "subscription": "projects/acme/subscriptions/catalog-sync"
        });
        Request::post("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn push_delivery_advances_the_cursor() {
        let stack = MockStack::with_records(fixtures::catalog(1));

        let response = app(&stack).oneshot(push(SyncCursor::START)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"outcome": "advanced", "next_offset": 1, "published": 1, "failed": 0})
        );
        assert_eq!(stack.queue.enqueued().await, [SyncCursor::new(1)]);
    }

    #[tokio::test]
    async fn push_past_the_end_completes() {
        let stack = MockStack::default();

        let response = app(&stack).oneshot(push(SyncCursor::new(41))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"outcome": "completed"})
        );
        assert_eq!(stack.notifier.calls(), 1);
    }

    #[tokio::test]
    async fn malformed_delivery_is_a_bad_request() {
        let stack = MockStack::default();
        let request = Request::post("/")
            .body(Body::from(r#"{"message":{"data":"!!!"}}"#))
            .unwrap();

        let response = app(&stack).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(stack.source.requested().await.is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_is_a_server_error() {
        let stack = MockStack::with_records(fixtures::catalog(1));
        stack.source.fail_with_status(502).await;

        let response = app(&stack).oneshot(push(SyncCursor::START)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(stack.queue.enqueued().await.is_empty());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(&MockStack::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn metrics_are_rendered_as_text() {
        let response = app(&MockStack::default())
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("catsync_steps_total"));
    }

    #[test]
    fn only_decode_errors_are_client_errors() {
        let decode = StepError::Decode(catsync_core::DecodeError::Offset("-1".into()));
        let republish = StepError::Republish(catsync_core::RepublishError::Closed);
        assert_eq!(status_for(&decode), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&republish), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
