//! The production request context.
//!
//! An [`HttpContext`] owns the request being served and the response the
//! handler writes. Instances are recycled by the
//! [`ContextPool`](crate::ContextPool): `reset` binds a new request and drops
//! every trace of the previous one.

use bills_core::{Binder, Context, Logger};
use bytes::Bytes;
use http::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use std::sync::Arc;

/// Request context used by the server.
#[derive(Debug)]
pub struct HttpContext {
    request: Request<Bytes>,
    response: Option<Response<Bytes>>,
    logger: Logger,
    binder: Arc<Binder>,
}

impl HttpContext {
    /// Creates an idle context.
    pub fn new(logger: Logger, binder: Arc<Binder>) -> Self {
        Self {
            request: Request::default(),
            response: None,
            logger,
            binder,
        }
    }

    /// Binds `request` and discards any previous request and response.
    pub fn reset(&mut self, request: Request<Bytes>) {
        self.request = request;
        self.response = None;
    }

    /// Drops the bound request and response.
    pub fn clear(&mut self) {
        self.request = Request::default();
        self.response = None;
    }

    /// The bound request.
    #[must_use]
    pub fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    /// Returns `true` once a response has been written.
    #[must_use]
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Takes the written response, or an empty `200 OK` if none was written.
    pub fn take_response(&mut self) -> Response<Bytes> {
        self.response.take().unwrap_or_else(|| {
            let mut response = Response::new(Bytes::new());
            *response.status_mut() = StatusCode::OK;
            response
        })
    }
}

impl Context for HttpContext {
    fn method(&self) -> &Method {
        self.request.method()
    }

    fn uri(&self) -> &Uri {
        self.request.uri()
    }

    fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    fn body(&self) -> &Bytes {
        self.request.body()
    }

    fn logger(&self) -> &Logger {
        &self.logger
    }

    fn binder(&self) -> &Binder {
        &self.binder
    }

    fn respond(&mut self, response: Response<Bytes>) {
        self.response = Some(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bills_core::{ContextExt, Problem};

    fn context() -> HttpContext {
        HttpContext::new(Logger::default(), Arc::new(Binder::default()))
    }

    fn request(uri: &str, body: &'static str) -> Request<Bytes> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn test_reset_binds_request() {
        let mut ctx = context();
        ctx.reset(request("/transactions?x=1", "{}"));
        assert_eq!(ctx.method(), Method::POST);
        assert_eq!(ctx.path(), "/transactions");
        assert_eq!(ctx.body().as_ref(), b"{}");
    }

    #[test]
    fn test_reset_discards_previous_response() {
        let mut ctx = context();
        ctx.reset(request("/a", ""));
        ctx.write_problem(&Problem::not_found("/a"));
        assert!(ctx.has_response());

        ctx.reset(request("/b", ""));
        assert!(!ctx.has_response());
        assert_eq!(ctx.path(), "/b");
    }

    #[test]
    fn test_default_response_is_empty_ok() {
        let mut ctx = context();
        ctx.reset(request("/a", ""));
        let response = ctx.take_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_clear_drops_request() {
        let mut ctx = context();
        ctx.reset(request("/a", "payload"));
        ctx.clear();
        assert!(ctx.body().is_empty());
        assert_eq!(ctx.path(), "/");
    }
}
