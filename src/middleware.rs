//! Request ID middleware for correlating logs with requests.
//!
//! Reuses a well-formed `x-request-id` from the caller (e.g. a load balancer
//! or CI probe) or generates a UUID v4, wraps the request in a tracing span
//! carrying that id, and echoes it back in the response headers.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::header::HeaderValue;
use tracing::Instrument;
use uuid::Uuid;

/// Header used to carry the request ID in both directions.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID stored in request extensions; handlers record it on their spans.
#[derive(Clone, Copy, Debug)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Take the caller's id if it parses as a UUID, otherwise mint a new one.
    fn from_request(request: &Request) -> Self {
        let inbound = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());

        Self(inbound.unwrap_or_else(Uuid::new_v4))
    }
}

/// Middleware that assigns a request ID and creates a request span.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including other middleware and handlers.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_request(&request);

    let span = tracing::info_span!(
        "request",
        request_id = %request_id.0,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();
    request.extensions_mut().insert(request_id);

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        // A hyphenated UUID is always a valid header value
        if let Ok(value) = HeaderValue::from_str(&request_id.0.to_string()) {
            response.headers_mut().insert(X_REQUEST_ID, value);
        }

        response
    }
    .instrument(span)
    .await
}
