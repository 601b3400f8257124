//! Per-request span and the summary line written when a request completes.

use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, field, info, info_span};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "failed"
    } else if status.is_client_error() {
        "rejected"
    } else {
        "ok"
    }
}

/// Opens a `request` span around the handler and echoes the generated id back
/// in `x-request-id` so a client report can be matched to the logs.
pub async fn request_logging(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    // Unknown paths have no matched route.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or("-", MatchedPath::as_str)
        .to_owned();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        route = %route,
        status = field::Empty,
    );

    let mut response = next.run(req).instrument(span.clone()).await;

    let status = response.status();
    span.record("status", status.as_u16());

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    span.in_scope(|| {
        info!(
            event = "http_request_finished",
            elapsed_ms,
            outcome = outcome(status),
            "Request finished"
        );
    });

    response
}
