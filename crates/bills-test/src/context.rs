//! In-memory [`Context`] for exercising handlers and middleware directly.

use crate::error::TestError;
use crate::response::TestResponse;
use bills_core::{BillsResult, Binder, Context, Handler, Logger};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Response, StatusCode, Uri};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A [`Context`] double holding the request in memory and recording the
/// response the handler writes.
///
/// # Example
///
/// ```
/// use bills_core::{handler_fn, ContextExt};
/// use bills_test::TestContext;
/// use http::{Method, StatusCode};
///
/// # tokio_test::block_on(async {
/// let handler = handler_fn(|ctx| {
///     Box::pin(async move {
///         let path = ctx.path().to_string();
///         ctx.write_response(StatusCode::OK, &path)
///     })
/// });
///
/// let mut ctx = TestContext::new(Method::GET, "/transactions/7");
/// ctx.call(&handler).await.unwrap();
/// assert_eq!(ctx.status(), Some(StatusCode::OK));
/// assert_eq!(ctx.response_json::<String>().unwrap(), "/transactions/7");
/// # });
/// ```
#[derive(Debug)]
pub struct TestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    logger: Logger,
    binder: Binder,
    response: Option<Response<Bytes>>,
}

impl TestContext {
    /// Creates a context for `method` and `uri`.
    ///
    /// # Panics
    ///
    /// Panics if `uri` does not parse.
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        let uri = uri.as_ref();
        Self {
            method,
            uri: uri
                .parse()
                .unwrap_or_else(|e| panic!("invalid test URI {uri:?}: {e}")),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            logger: Logger::new("bills-test"),
            binder: Binder::default(),
            response: None,
        }
    }

    /// Adds a request header.
    ///
    /// # Panics
    ///
    /// Panics if the name or value is not a valid header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = HeaderName::try_from(name.as_ref())
            .unwrap_or_else(|e| panic!("invalid header name: {e}"));
        let value = HeaderValue::try_from(value.as_ref())
            .unwrap_or_else(|e| panic!("invalid header value: {e}"));
        self.headers.insert(name, value);
        self
    }

    /// Sets the raw request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a JSON request body and its content type.
    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, TestError> {
        self.body = Bytes::from(serde_json::to_vec(value)?);
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(bills_core::APPLICATION_JSON),
        );
        Ok(self)
    }

    /// Replaces the binder.
    pub fn with_binder(mut self, binder: Binder) -> Self {
        self.binder = binder;
        self
    }

    /// Replaces the logger.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Runs `handler` against this context.
    pub async fn call<H: Handler + ?Sized>(&mut self, handler: &H) -> BillsResult<()> {
        handler.call(self).await
    }

    /// The response written so far, if any.
    #[must_use]
    pub fn response(&self) -> Option<&Response<Bytes>> {
        self.response.as_ref()
    }

    /// Status of the written response, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(Response::status)
    }

    /// Decodes the written response body as JSON.
    pub fn response_json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        let response = self
            .response
            .as_ref()
            .ok_or_else(|| TestError::BodyRead("no response was written".to_string()))?;
        Ok(serde_json::from_slice(response.body())?)
    }

    /// Takes the written response; an empty `200` if nothing was written.
    pub fn take_response(&mut self) -> TestResponse {
        TestResponse::from_http(self.response.take().unwrap_or_default())
    }
}

impl Context for TestContext {
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
