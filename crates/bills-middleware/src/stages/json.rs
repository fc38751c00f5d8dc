//! JSON content-type enforcement.
//!
//! Requests that carry a body must declare `application/json`. A missing or
//! unparsable `Content-Type` is answered with 415; any other media type with
//! 400. Requests without a body pass through untouched.

use crate::Middleware;
use bills_core::{BillsResult, BoxFuture, BoxedHandler, Context, Handler, Problem};
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use mime::Mime;
use std::sync::Arc;

const INVALID_CONTENT_TYPE: &str = "Invalid Content-type";
const JSON_REQUIRED: &str = "Content-Type header must be application/json";

/// Rejects bodies that are not declared as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContentType;

impl Middleware for JsonContentType {
    fn name(&self) -> &'static str {
        "json_content_type"
    }

    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Arc::new(RequireJson { next })
    }
}

struct RequireJson {
    next: BoxedHandler,
}

impl Handler for RequireJson {
    fn call<'a>(&'a self, ctx: &'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>> {
        Box::pin(async move {
            if !ctx.body().is_empty() {
                require_json(ctx.headers())?;
            }
            self.next.call(ctx).await
        })
    }
}

/// Checks that `headers` declare a JSON body.
pub fn require_json(headers: &HeaderMap) -> Result<(), Problem> {
    let declared = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let media: Mime = declared
        .parse()
        .map_err(|_| Problem::unsupported_media_type(INVALID_CONTENT_TYPE))?;

    if media.essence_str() == mime::APPLICATION_JSON.essence_str() {
        Ok(())
    } else {
        Err(Problem::bad_request(JSON_REQUIRED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_json_accepted() {
        assert!(require_json(&headers(Some("application/json"))).is_ok());
        assert!(require_json(&headers(Some("application/json; charset=utf-8"))).is_ok());
    }

    #[test]
    fn test_missing_header_is_unsupported() {
        let problem = require_json(&headers(None)).unwrap_err();
        assert_eq!(problem.code, 415);
        assert_eq!(problem.message, "Invalid Content-type");
    }

    #[test]
    fn test_garbage_header_is_unsupported() {
        let problem = require_json(&headers(Some("not a media type"))).unwrap_err();
        assert_eq!(problem.code, 415);
    }

    #[test]
    fn test_other_media_type_is_bad_request() {
        let problem = require_json(&headers(Some("text/plain"))).unwrap_err();
        assert_eq!(problem.code, 400);
        assert_eq!(problem.message, "Content-Type header must be application/json");
        assert_eq!(problem.type_uri, "https://mybils.io/problems/bad-request");
    }
}
