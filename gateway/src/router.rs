//! HTTP surface: `GET /health`, `GET /tools`, `POST /execute`.
//!
//! CORS is wide open and `OPTIONS` on any path answers 200 with no body.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use soar_core::Dispatcher;

use crate::api::{ErrorResponse, ExecuteRequest, ExecuteResponse, ToolDef, ToolsResponse};
use crate::error::GatewayError;

// Shared by every handler; the dispatcher is immutable, so no locking.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check).fallback(not_found))
        .route("/tools", get(list_tools).fallback(not_found))
        .route("/execute", post(execute).fallback(not_found))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `0.0.0.0:<port>` and serves until Ctrl-C.
pub async fn serve(dispatcher: Arc<Dispatcher>, port: u16) -> Result<(), GatewayError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| GatewayError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!("Server running at http://localhost:{port}");
    info!("Endpoints: /health, /tools, /execute");

    let app = build_router(AppState { dispatcher });
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .map_err(GatewayError::Serve)
}

// --- HANDLERS ---

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_tools(State(state): State<AppState>) -> Json<ToolsResponse> {
    let tools = state.dispatcher.tools().iter().map(ToolDef::from).collect();
    Json(ToolsResponse { tools })
}

async fn execute(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ExecuteRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "rejected /execute body");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    let arguments = request.arguments.unwrap_or_default();
    let reply = state.dispatcher.call(&request.tool, &arguments).await;
    Json(ExecuteResponse { result: reply.text }).into_response()
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found".to_string())
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}
