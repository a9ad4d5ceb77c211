//! Clickstream HTTP API
//!
//! Axum server exposing the in-memory clickstream dataset over a single
//! read-only endpoint.
//!
//! Architecture: the endpoint has a thin axum handler that delegates to a pure
//! inner function. The inner function is directly testable without axum
//! dispatch machinery.
//!
//! Endpoints:
//! - GET /api/v1/clickstream?title=<title> — top sources and targets for a page

use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clickstream_core::{normalize_title, ClickstreamConfig, Dataset, QueryResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const CLICKSTREAM_PATH: &str = "/api/v1/clickstream";

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub dataset: Dataset,
}

impl HttpState {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(CLICKSTREAM_PATH, get(clickstream_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    dataset: Dataset,
    config: ClickstreamConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    let state = Arc::new(HttpState::new(dataset));

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Clickstream HTTP API listening on http://{}", addr);
    tracing::info!(
        "Try: http://{}{}?title=Frida_Kahlo",
        addr,
        CLICKSTREAM_PATH
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ClickstreamParams {
    pub title: Option<String>,
}

/// Standard HTTP error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            status: "error".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing required query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid query parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid query string: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        tracing::debug!(status = status.as_u16(), %message, "Client error");
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Inner clickstream lookup — validates the title, normalizes it and reads
/// both directions from the dataset.
pub fn clickstream_inner(
    dataset: &Dataset,
    params: ClickstreamParams,
) -> std::result::Result<QueryResult, ApiError> {
    let raw = params.title.ok_or(ApiError::MissingParameter("title"))?;
    if raw.trim().is_empty() {
        return Err(ApiError::InvalidParameter {
            name: "title",
            reason: "must not be empty".to_string(),
        });
    }

    let title = normalize_title(&raw);
    Ok(dataset.query(&title))
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

#[tracing::instrument(skip(state))]
pub async fn clickstream_handler(
    State(state): State<Arc<HttpState>>,
    params: std::result::Result<Query<ClickstreamParams>, QueryRejection>,
) -> std::result::Result<Json<QueryResult>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let result = clickstream_inner(&state.dataset, params)?;
    tracing::debug!(
        title = %result.title,
        sources = result.sources.len(),
        targets = result.targets.len(),
        "Clickstream lookup"
    );
    Ok(Json(result))
}

// ============================================================================
// Unit Tests — call inner functions directly
// ============================================================================
