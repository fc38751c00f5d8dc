//! In-memory client driving a [`RestServer`].

use crate::error::TestError;
use crate::request::TestRequestBuilder;
use crate::response::TestResponse;
use bills_server::RestServer;
use bytes::Bytes;
use http::Method;
use std::sync::Arc;

/// Sends requests straight to [`RestServer::handle`], with no socket.
///
/// Requests go through routing, the middleware pipeline, the context pool
/// and problem rendering exactly as they would over HTTP.
///
/// # Example
///
/// ```
/// use bills_core::{handler_fn, ContextExt};
/// use bills_server::{RestServer, Router};
/// use bills_test::TestClient;
/// use http::StatusCode;
///
/// # tokio_test::block_on(async {
/// let router = Router::new().get(
///     "/ping",
///     handler_fn(|ctx| Box::pin(async move { ctx.write_response(StatusCode::OK, &"pong") })),
/// );
/// let client = TestClient::new(RestServer::builder().router(router).build());
///
/// let response = client.get("/ping").send().await;
/// response.assert_status(StatusCode::OK);
/// assert_eq!(response.json::<String>().unwrap(), "pong");
/// # });
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct TestClient {
    server: Arc<RestServer>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Wraps a server.
    pub fn new(server: RestServer) -> Self {
        Self::from_shared(Arc::new(server))
    }

    /// Wraps a server that is shared with other callers.
    pub fn from_shared(server: Arc<RestServer>) -> Self {
        Self {
            server,
            default_headers: Vec::new(),
        }
    }

    /// The server under test.
    pub fn server(&self) -> &Arc<RestServer> {
        &self.server
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Creates a GET request.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Creates a POST request.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Creates a PUT request.
    pub fn put(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// Creates a PATCH request.
    pub fn patch(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PATCH, uri)
    }

    /// Creates a DELETE request.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Creates a request with any method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        let mut builder = TestRequestBuilder::new(method, uri);
        for (name, value) in &self.default_headers {
            builder = builder.header(name, value);
        }
        TestClientRequest {
            client: self,
            builder,
        }
    }
}

/// A request bound to a [`TestClient`].
#[must_use]
#[derive(Debug)]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl TestClientRequest<'_> {
    /// Sets a header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(mut self, content_type: impl AsRef<str>) -> Self {
        self.builder = self.builder.content_type(content_type);
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets a JSON body and content type.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics if the request could not be built.
    pub async fn send(self) -> TestResponse {
        self.try_send()
            .await
            .unwrap_or_else(|e| panic!("test request failed: {e}"))
    }

    /// Sends the request, reporting build failures.
    pub async fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        let response = self.client.server.handle(request).await;
        Ok(TestResponse::from_http(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bills_core::{handler_fn, ContextExt, ProblemKind};
    use bills_server::Router;
    use http::StatusCode;

    fn client() -> TestClient {
        let router = Router::new()
            .get(
                "/headers/:name",
                handler_fn(|ctx| {
                    Box::pin(async move {
                        let name = ctx.path().rsplit('/').next().unwrap_or_default().to_string();
                        let value = ctx.header(name.as_str()).map(str::to_string);
                        ctx.write_response(StatusCode::OK, &value)
                    })
                }),
            )
            .post(
                "/echo",
                handler_fn(|ctx| {
                    Box::pin(async move {
                        let body = String::from_utf8_lossy(ctx.body()).into_owned();
                        ctx.write_response(StatusCode::OK, &body)
                    })
                }),
            );
        TestClient::new(RestServer::builder().router(router).build())
    }

    #[tokio::test]
    async fn test_default_headers() {
        let client = client().with_default_header("x-tenant", "acme");
        let response = client.get("/headers/x-tenant").send().await;
        assert_eq!(response.json::<Option<String>>().unwrap().as_deref(), Some("acme"));
    }

    #[tokio::test]
    async fn test_json_body() {
        let response = client()
            .post("/echo")
            .json(&serde_json::json!({"a": 1}))
            .send()
            .await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<String>().unwrap(), r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_routing_failures() {
        let client = client();
        client
            .get("/missing")
            .send()
            .await
            .assert_problem(ProblemKind::NotFound);
        client
            .delete("/echo")
            .send()
            .await
            .assert_problem(ProblemKind::MethodNotAllowed);
    }

    #[tokio::test]
    async fn test_try_send_reports_build_error() {
        let result = client().get("/echo").header("bad header", "x").try_send().await;
        assert!(matches!(result, Err(TestError::InvalidHeader(_))));
    }
}
