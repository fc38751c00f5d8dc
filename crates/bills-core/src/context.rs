//! The per-request capability handed to handlers.
//!
//! [`Context`] is the object-safe surface: request metadata, the collected
//! body, the shared [`Logger`] and [`Binder`], and a way to set the response.
//! [`ContextExt`] layers the typed helpers on top and is implemented for
//! every context, including `dyn Context`.
//!
//! The production implementation is pooled by the server; tests use an
//! in-memory double. Handlers only see `&mut dyn Context`.

use crate::validate::Validate;
use crate::{Binder, BillsResult, Logger, Problem};
use bytes::Bytes;
use http::header::{AsHeaderName, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, Response, StatusCode, Uri};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Media type of every response written through [`ContextExt`].
pub const APPLICATION_JSON: &str = "application/json";

/// Request-scoped state and response sink.
pub trait Context: Send + Sync {
    /// Request method.
    fn method(&self) -> &Method;

    /// Request URI.
    fn uri(&self) -> &Uri;

    /// Request headers.
    fn headers(&self) -> &HeaderMap;

    /// Fully collected request body.
    fn body(&self) -> &Bytes;

    /// Shared application logger.
    fn logger(&self) -> &Logger;

    /// Shared body binder.
    fn binder(&self) -> &Binder;

    /// Replaces the pending response.
    fn respond(&mut self, response: Response<Bytes>);
}

/// Typed helpers available on every [`Context`].
pub trait ContextExt: Context {
    /// Request path without the query string.
    fn path(&self) -> &str {
        self.uri().path()
    }

    /// A header value, if present and visible ASCII.
    fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers().get(name).and_then(|value| value.to_str().ok())
    }

    /// Decodes and validates the body into `T`.
    ///
    /// An empty body is validated as `T::default()`.
    fn read_body<T>(&self) -> BillsResult<T>
    where
        T: DeserializeOwned + Validate + Default,
    {
        Ok(self.binder().read_body(self.body())?)
    }

    /// Serializes `data` as the JSON response with `status`.
    ///
    /// Statuses that forbid a body (`204`, `304`, `1xx`) are written empty.
    fn write_response<T: Serialize + ?Sized>(
        &mut self,
        status: StatusCode,
        data: &T,
    ) -> BillsResult<()> {
        let body = if permits_body(status) {
            serde_json::to_vec(data)
                .map(Bytes::from)
                .map_err(|error| Problem::internal_server_error_with(error.to_string()))?
        } else {
            Bytes::new()
        };
        self.respond(json_response(status, body));
        Ok(())
    }

    /// Writes `problem` as the response.
    fn write_problem(&mut self, problem: &Problem) {
        self.respond(problem_response(problem));
    }
}

impl<C: Context + ?Sized> ContextExt for C {}

/// Builds a response with a JSON content type.
pub fn json_response(status: StatusCode, body: Bytes) -> Response<Bytes> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    response
}

/// Renders `problem` as a JSON response with its status.
pub fn problem_response(problem: &Problem) -> Response<Bytes> {
    let body = serde_json::to_vec(problem).unwrap_or_default();
    json_response(problem.status(), Bytes::from(body))
}

fn permits_body(status: StatusCode) -> bool {
    !(status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{FieldDescriptor, FieldValue, Rule};
    use serde::Deserialize;

    struct StubContext {
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        logger: Logger,
        binder: Binder,
        response: Option<Response<Bytes>>,
    }

    impl StubContext {
        fn new(uri: &str, body: &'static str) -> Self {
            Self {
                method: Method::POST,
                uri: uri.parse().unwrap(),
                headers: HeaderMap::new(),
                body: Bytes::from_static(body.as_bytes()),
                logger: Logger::default(),
                binder: Binder::default(),
                response: None,
            }
        }
    }

    impl Context for StubContext {
        fn method(&self) -> &Method {
            &self.method
        }
        fn uri(&self) -> &Uri {
            &self.uri
        }
        fn headers(&self) -> &HeaderMap {
            &self.headers
        }
        fn body(&self) -> &Bytes {
            &self.body
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

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(default)]
    struct Note {
        text: String,
    }

    impl Validate for Note {
        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new("Text", &[Rule::Required])];
            FIELDS
        }

        fn field(&self, index: usize) -> Option<&dyn FieldValue> {
            (index == 0).then_some(&self.text as &dyn FieldValue)
        }
    }

    #[test]
    fn test_path_ignores_query() {
        let ctx = StubContext::new("/notes/7?full=true", "");
        assert_eq!(ctx.path(), "/notes/7");
    }

    #[test]
    fn test_read_body_through_dyn_context() {
        let ctx = StubContext::new("/notes", r#"{"text":"hi"}"#);
        let ctx: &dyn Context = &ctx;
        let note: Note = ctx.read_body().unwrap();
        assert_eq!(note.text, "hi");
    }

    #[test]
    fn test_read_body_validation_problem() {
        let ctx = StubContext::new("/notes", "{}");
        let problem = ctx.read_body::<Note>().unwrap_err().into_problem();
        assert_eq!(problem.field_errors, vec!["Text is required"]);
    }

    #[test]
    fn test_write_response_sets_json() {
        let mut ctx = StubContext::new("/notes", "");
        ctx.write_response(StatusCode::OK, &Note { text: "a".into() })
            .unwrap();

        let response = ctx.response.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_JSON);
        assert_eq!(response.body().as_ref(), br#"{"text":"a"}"#);
    }

    #[test]
    fn test_no_content_has_empty_body() {
        let mut ctx = StubContext::new("/notes", "");
        ctx.write_response(StatusCode::NO_CONTENT, &Note::default())
            .unwrap();

        let response = ctx.response.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_write_problem() {
        let mut ctx = StubContext::new("/notes", "");
        ctx.write_problem(&Problem::not_found("/notes"));

        let response = ctx.response.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let decoded: Problem = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(decoded, Problem::not_found("/notes"));
    }
}
