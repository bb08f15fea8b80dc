//! HTTP server: the `/api/chat` endpoint plus the static widget page.
//!
//! Any path not matched by an API route is served from the configured
//! public directory, which ships the browser version of the widget.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::AppState;
use crate::client::CHAT_PATH;
use crate::config::AppConfig;
use crate::llm::ChatBackend;
use crate::types::{ChatRequest, ChatResponse};

/// Maximum accepted request body.
const BODY_LIMIT: usize = 1024 * 1024;

/// Start the Axum server with the provided configuration and backend.
pub async fn start_server(
    config: Arc<AppConfig>,
    backend: Arc<dyn ChatBackend>,
) -> anyhow::Result<()> {
    let state = AppState {
        backend,
        config: Arc::clone(&config),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        public_dir = %config.server.public_dir,
        "Server started"
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    // A zero timeout disables the limit; keep the layer so the type is fixed.
    let timeout = match state.config.server.request_timeout_secs {
        0 => Duration::from_secs(365 * 24 * 60 * 60),
        secs => Duration::from_secs(secs),
    };

    Router::new()
        .route(CHAT_PATH, post(api_chat))
        .fallback_service(ServeDir::new(&state.config.server.public_dir))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(axum::middleware::from_fn(move |req: Request, next: Next| async move {
            match tokio::time::timeout(timeout, next.run(req)).await {
                Ok(res) => res,
                Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
            }
        }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Error body returned by the API.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

fn error_response(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

/// POST /api/chat - Generate a reply for the submitted messages.
async fn api_chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    if req.messages.iter().all(|m| m.text.trim().is_empty()) {
        return error_response(StatusCode::BAD_REQUEST, "Messages must not be empty");
    }

    info!(messages = req.messages.len(), "Received chat request");

    match state.backend.complete(&req.messages).await {
        Ok(text) => Json(ChatResponse { result: Some(text) }).into_response(),
        Err(e) => {
            error!(error = %e, "Chat backend failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate response",
            )
        }
    }
}
