//! HTTP daemon/server mode for `contractiq`.
//!
//! This module exposes a small HTTP+JSON API over the two core
//! functions:
//!
//! - `POST /v1/query` – accepts a JSON-encoded `QueryRequest` and
//!   returns a `QueryResult`.
//! - `POST /v1/export` – accepts a JSON-encoded `ExportRequest` and
//!   returns a `Payload`.
//! - `GET /v1/health` – simple health check endpoint.
//!
//! Records travel in the request body; the server keeps no state
//! between calls.

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::export;
use crate::models::{ExportRequest, Payload, QueryRequest, QueryResult};
use crate::search::engine;

/// Simple health-check response payload.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// JSON error body returned by the API.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Error type used by HTTP handlers to map failures into JSON error
/// responses.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, error = %self.message, "request failed");
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Build the Axum router for the contractiq HTTP API.
pub fn router() -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/query", post(query))
        .route("/v1/export", post(export_record))
}

/// Run the HTTP server bound to the provided socket address.
///
/// This is used by the CLI `contractiq serve` subcommand.
pub async fn run(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_with_listener(listener).await
}

/// Run the HTTP server using an existing `TcpListener`.
///
/// Tests use this to bind to an ephemeral port.
pub async fn serve_with_listener(listener: TcpListener) -> Result<()> {
    info!(addr = ?listener.local_addr().ok(), "serving HTTP API");
    axum::serve(listener, router()).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn query(
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResult>, ApiError> {
    let Json(request) = body?;
    Ok(Json(engine::run_query(request)))
}

async fn export_record(
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<Payload>, ApiError> {
    let Json(request) = body?;
    export::export_selected(&request.records, request.index, request.format)
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "no record at index {} ({} records given)",
                request.index,
                request.records.len()
            ))
        })
}
