//! Request tracing.
//!
//! Opens a `tracing` span per request carrying the service name, request id,
//! method, and path. The request id comes from `x-request-id` when present,
//! otherwise a UUID v7 is generated. Completion is logged at debug level and
//! failures at warn level; the error itself is passed on unchanged.

use crate::Middleware;
use bills_core::{BillsResult, BoxFuture, BoxedHandler, Context, ContextExt, Handler};
use http::HeaderMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// The header name for request ID propagation.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Opens a span around every request.
#[derive(Debug, Clone)]
pub struct RequestTracing {
    service: Arc<str>,
}

impl RequestTracing {
    /// Creates the stage for `service`.
    pub fn new(service: impl Into<Arc<str>>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl Middleware for RequestTracing {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Arc::new(Traced {
            next,
            service: Arc::clone(&self.service),
        })
    }
}

struct Traced {
    next: BoxedHandler,
    service: Arc<str>,
}

impl Handler for Traced {
    fn call<'a>(&'a self, ctx: &'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>> {
        let span = tracing::info_span!(
            "request",
            service = %self.service,
            request_id = %request_id(ctx.headers()),
            http.method = %ctx.method(),
            http.target = %ctx.path(),
        );

        Box::pin(async move {
            let started = Instant::now();
            let result = self.next.call(ctx).instrument(span.clone()).await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(()) => tracing::debug!(parent: &span, elapsed_ms, "request completed"),
                Err(error) => {
                    tracing::warn!(parent: &span, elapsed_ms, error = %error, "request failed");
                }
            }
            result
        })
    }
}

/// The propagated request id, or a fresh UUID v7.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map_or_else(|| Uuid::now_v7().to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_request_id_propagated() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }

    #[test]
    fn test_request_id_generated() {
        let generated = request_id(&HeaderMap::new());
        let parsed = Uuid::parse_str(&generated).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }
}
