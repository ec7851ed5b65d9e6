//! Read-only configuration server.
//!
//! Serves the two finished documents verbatim from disk. Serving is
//! stateless and does not coordinate with an in-progress rebuild, so a
//! reader may observe a document in its reset or fully-merged state.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::document::DocumentPaths;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub paths: DocumentPaths,
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let app_state = Arc::new(state);

    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(healthz_handler))
        .route("/config/collector", get(collector_handler))
        .route("/config/cloudwatch", get(cloudwatch_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Index page linking the exposed documents.
async fn index_handler() -> Html<&'static str> {
    Html(
        "<p><a href=\"/config/collector\">Collector config</a></p>\
         <p><a href=\"/config/cloudwatch\">Cloudwatch exporter config</a></p>",
    )
}

/// Liveness probe.
async fn healthz_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Serve the collector document verbatim.
async fn collector_handler(State(state): State<Arc<AppState>>) -> Response {
    serve_document(state.paths.collector.clone()).await
}

/// Serve the cloudwatch exporter document verbatim.
async fn cloudwatch_handler(State(state): State<Arc<AppState>>) -> Response {
    serve_document(state.paths.cloudwatch.clone()).await
}

/// Read a document and return its current on-disk bytes.
async fn serve_document(path: PathBuf) -> Response {
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/yaml")],
            content,
        )
            .into_response(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Document not found");
            (StatusCode::NOT_FOUND, "configuration not found").into_response()
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "Failed to read document");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", err)).into_response()
        }
    }
}
