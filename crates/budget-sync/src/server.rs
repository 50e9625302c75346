//! HTTP server for Asana webhooks.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::aggregator;
use crate::client::AsanaClient;
use crate::config::Config;
use crate::webhooks::{WebhookEnvelope, HOOK_SECRET_HEADER};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configuration.
    pub config: Config,
    /// Asana API client.
    pub asana_client: Option<AsanaClient>,
}

/// Build the HTTP router for the budget sync service.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Webhook endpoint
        .route("/webhook", get(webhook_liveness).post(webhook_handler))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe for the webhook route itself.
async fn webhook_liveness() -> Json<Value> {
    Json(json!({ "message": "Webhook listener is running" }))
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Readiness check endpoint.
async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    if state.asana_client.is_none() {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(json!({ "status": "ready" })))
}

/// Handle incoming Asana webhooks.
///
/// This handler:
/// 1. Echoes the `X-Hook-Secret` handshake when present
/// 2. Parses the event envelope and recomputes the budget summary when the
///    delivery carries events
/// 3. Always acknowledges with 200, even for malformed bodies, so the sender
///    never enters a retry storm
async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Asana handshake: a slow or missing echo makes Asana disable the
    // subscription, so this path responds before any outbound work.
    if let Some(secret) = headers.get(HOOK_SECRET_HEADER) {
        info!("Received webhook handshake");
        return (
            StatusCode::OK,
            [(HOOK_SECRET_HEADER, secret.clone())],
            Json(json!({ "success": true })),
        )
            .into_response();
    }

    debug!(
        headers = headers.len(),
        bytes = body.len(),
        "Received webhook delivery"
    );

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Ignoring malformed webhook body");
            return (StatusCode::OK, Json(json!({ "status": "received" }))).into_response();
        }
    };

    let envelope: WebhookEnvelope = serde_json::from_value(payload.clone()).unwrap_or_default();

    if envelope.has_events() {
        info!(events = envelope.events.len(), "Processing webhook events");

        if let Some(client) = &state.asana_client {
            match aggregator::recompute(
                client,
                &state.config.project_gid,
                state.config.fetch_concurrency,
            )
            .await
            {
                Ok(summary) => {
                    info!(
                        total_budget = summary.total_budget,
                        total_actual_cost = summary.total_actual_cost,
                        over_budget_tasks = summary.over_budget_tasks,
                        "Budget summary recomputed"
                    );
                }
                Err(e) => {
                    // Internal failures are surfaced through logs only; the
                    // webhook ack stays 200.
                    error!(error = %e, "Budget recomputation failed");
                }
            }
        } else {
            warn!("No Asana client configured; skipping recomputation");
        }
    } else {
        debug!("Webhook delivery without events; acknowledging");
    }

    (
        StatusCode::OK,
        Json(json!({ "status": "received", "data": payload })),
    )
        .into_response()
}
