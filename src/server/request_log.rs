use crate::utils::RequestIdExt;
use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};
use tracing::{info, warn};

/// Paths that get a request/response log line. The HTML index is skipped.
fn is_logged_route(path: &str) -> bool {
    path.starts_with("/api") || path.starts_with("/health")
}

/// Structured request/response logging for API routes
pub async fn request_response_logger(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if !is_logged_route(&path) {
        return next.run(req).await;
    }

    let method = req.method().to_string();
    let request_id = req.extensions().request_id();
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|connect_info| connect_info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    info!(
        method = %method,
        path = %path,
        ip = %ip,
        request_id = %request_id,
        "API request"
    );

    let start = Instant::now();
    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status,
            latency_ms = %latency_ms,
            request_id = %request_id,
            "API response"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status,
            latency_ms = %latency_ms,
            request_id = %request_id,
            "API response"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_logged_route() {
        assert!(is_logged_route("/api/v1.0/stations"));
        assert!(is_logged_route("/health"));
        assert!(!is_logged_route("/"));
    }
}
