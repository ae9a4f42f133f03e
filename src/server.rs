//! Axum-based webhook endpoint
//!
//! `POST /webhook` verifies the LINE signature, acknowledges the request
//! right away, and hands every text message to the dispatcher on its own
//! task. `GET /health` is a liveness probe. Those tasks are tracked so a
//! graceful shutdown waits for in-flight replies before exiting.

use crate::bot::Dispatcher;
use crate::config::ServerConfig;
use crate::line::{verify_signature, WebhookPayload, SIGNATURE_HEADER};
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::task::TaskTracker;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum webhook body size (1 MiB)
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// How long shutdown waits for in-flight replies
///
/// Covers three 5 s fetch attempts plus a reply and a fallback reply.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(40);

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub channel_secret: Arc<str>,
    pub tasks: TaskTracker,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, channel_secret: impl Into<Arc<str>>) -> Self {
        Self {
            dispatcher,
            channel_secret: channel_secret.into(),
            tasks: TaskTracker::new(),
        }
    }
}

/// Builds the router with all routes and layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(handle_health))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C
pub async fn run_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("parse server bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind webhook listener on {addr}"))?;

    tracing::info!(%addr, "Webhook server listening");

    let tasks = state.tasks.clone();
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("webhook server failed")?;

    drain_in_flight(&tasks, SHUTDOWN_GRACE).await;
    tracing::info!("Webhook server stopped");
    Ok(())
}

/// Stops accepting new event tasks and waits up to `grace` for the rest
///
/// Returns false if tasks were still running when the grace period ran out.
pub async fn drain_in_flight(tasks: &TaskTracker, grace: Duration) -> bool {
    tasks.close();
    if tasks.is_empty() {
        return true;
    }

    tracing::info!(in_flight = tasks.len(), "Waiting for in-flight replies");
    match tokio::time::timeout(grace, tasks.wait()).await {
        Ok(()) => {
            tracing::info!("In-flight replies finished");
            true
        }
        Err(_) => {
            tracing::warn!(
                abandoned = tasks.len(),
                "Shutdown grace period elapsed, dropping in-flight replies"
            );
            false
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn handle_health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        tracing::warn!("Webhook request without signature header");
        return (StatusCode::BAD_REQUEST, "Missing signature");
    };

    if !verify_signature(&state.channel_secret, &body, signature) {
        tracing::error!("Webhook signature verification failed");
        return (StatusCode::BAD_REQUEST, "Invalid signature");
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Webhook body is not a valid payload");
            return (StatusCode::BAD_REQUEST, "Invalid payload");
        }
    };

    let commands = payload.command_contexts();
    tracing::info!(
        events = payload.events.len(),
        text_messages = commands.len(),
        "Webhook received"
    );

    for ctx in commands {
        let dispatcher = state.dispatcher.clone();
        state.tasks.spawn(async move {
            let outcome = dispatcher.handle(&ctx).await;
            tracing::debug!(?outcome, "Event handled");
        });
    }

    (StatusCode::OK, "OK")
}
