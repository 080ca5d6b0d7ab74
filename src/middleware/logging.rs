//! Request logging middleware.
//!
//! Logs every HTTP request with method, path, status code, and latency.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Middleware that logs HTTP requests with timing information.
///
/// INFO for successes, WARN for client and server errors.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Skip logging for health checks to reduce noise
    if path == "/health" {
        return next.run(request).await;
    }

    let start = Instant::now();
    let response = next.run(request).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        warn!(%method, %path, %status, latency_ms, "request failed");
    } else {
        info!(%method, %path, %status, latency_ms, "request");
    }

    response
}
