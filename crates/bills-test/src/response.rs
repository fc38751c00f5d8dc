//! Test response wrapper.

use crate::error::TestError;
use bills_core::{Problem, ProblemKind};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Response, StatusCode};
use serde::de::DeserializeOwned;

/// A collected response with assertion helpers.
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    /// Wraps a dispatcher response.
    pub fn from_http(response: Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the status code as a u16.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns true for 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets a header value by name.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// Gets a header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as a string.
    pub fn text(&self) -> Result<String, TestError> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| TestError::BodyRead(format!("Invalid UTF-8: {e}")))
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Deserializes the body as a JSON value.
    pub fn json_value(&self) -> Result<serde_json::Value, TestError> {
        self.json()
    }

    /// Deserializes the body as a [`Problem`].
    pub fn problem(&self) -> Result<Problem, TestError> {
        self.json()
    }

    /// Asserts the status code.
    ///
    /// # Panics
    ///
    /// Panics if the status differs.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {} with body {}",
            expected,
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts a 2xx status.
    ///
    /// # Panics
    ///
    /// Panics if the status is not 2xx.
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.is_success(),
            "Expected success status, got {}",
            self.status
        );
        self
    }

    /// Asserts a header value.
    ///
    /// # Panics
    ///
    /// Panics if the header is missing or differs.
    pub fn assert_header(&self, name: impl AsRef<str>, expected: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        let actual = self.header_str(name);
        assert_eq!(
            actual,
            Some(expected.as_ref()),
            "Expected header {name} to be {:?}, got {actual:?}",
            expected.as_ref()
        );
        self
    }

    /// Asserts the body is a problem of `kind` with a matching status.
    ///
    /// # Panics
    ///
    /// Panics if the body is not that problem.
    pub fn assert_problem(&self, kind: ProblemKind) -> &Self {
        let problem = self
            .problem()
            .unwrap_or_else(|e| panic!("Expected a problem body: {e}"));
        assert_eq!(problem.kind(), Some(kind), "Unexpected problem {problem:?}");
        assert_eq!(self.status, kind.status(), "Problem status mismatch");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bills_core::problem_response;

    #[test]
    fn test_problem_response() {
        let response = TestResponse::from_http(problem_response(&Problem::not_found("/x")));
        response
            .assert_status(StatusCode::NOT_FOUND)
            .assert_header("content-type", "application/json")
            .assert_problem(ProblemKind::NotFound);
        assert_eq!(response.problem().unwrap().message, "The route `/x` does not exist");
    }

    #[test]
    fn test_text_and_json() {
        let response = TestResponse::from_http(Response::new(Bytes::from_static(b"[1,2]")));
        assert!(response.is_success());
        assert_eq!(response.text().unwrap(), "[1,2]");
        assert_eq!(response.json::<Vec<u8>>().unwrap(), vec![1, 2]);
        assert!(response.problem().is_err());
    }

    #[test]
    #[should_panic(expected = "Expected status")]
    fn test_assert_status_panics() {
        let response = TestResponse::from_http(Response::new(Bytes::new()));
        response.assert_status(StatusCode::CREATED);
    }
}
