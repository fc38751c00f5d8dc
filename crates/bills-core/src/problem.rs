//! Structured error payloads returned to clients.
//!
//! Every failed request is answered with a [`Problem`]. The set of problems
//! is closed: [`ProblemKind`] lists each category together with its HTTP
//! status, title, and type slug, and the constructors on [`Problem`] are the
//! only way to build one.
//!
//! # Wire format
//!
//! ```json
//! {
//!   "code": 400,
//!   "title": "Invalid request",
//!   "detail": "The request does not satisfy the validation rules",
//!   "instance": "N/A",
//!   "type": "https://mybils.io/problems/invalid-request",
//!   "fieldErrors": ["Title is required"]
//! }
//! ```
//!
//! `fieldErrors` is omitted when there are no field errors.
//!
//! # Example
//!
//! ```
//! use bills_core::{Problem, ProblemKind};
//!
//! let problem = Problem::not_found("/missing");
//! assert_eq!(problem.code, 404);
//! assert_eq!(problem.message, "The route `/missing` does not exist");
//! assert_eq!(problem.kind(), Some(ProblemKind::NotFound));
//! ```

use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL of every problem type URI.
pub const PROBLEM_BASE_URL: &str = "https://mybils.io";

/// Value of [`Problem::instance`]; occurrence URIs are not tracked.
pub const UNKNOWN_INSTANCE: &str = "N/A";

const DEFAULT_INTERNAL_MESSAGE: &str =
    "An undetermined error was triggered. Please, contact the support team";
const MALFORMED_MESSAGE: &str = "The request is malformed, verify the input or parameters sent";
const VALIDATION_MESSAGE: &str = "The request does not satisfy the validation rules";

/// The closed set of problem categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// Unexpected failure inside a handler or the framework.
    InternalServerError,
    /// The body could not be decoded.
    MalformedRequest,
    /// The request was rejected with a custom message.
    BadRequest,
    /// The request media type is missing or unreadable.
    UnsupportedMediaType,
    /// The decoded body violates its validation rules.
    InvalidRequest,
    /// No route pattern matches the path.
    NotFound,
    /// A route pattern matches but not for this method.
    MethodNotAllowed,
}

impl ProblemKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::InternalServerError,
        Self::MalformedRequest,
        Self::BadRequest,
        Self::UnsupportedMediaType,
        Self::InvalidRequest,
        Self::NotFound,
        Self::MethodNotAllowed,
    ];

    /// HTTP status answered for this kind.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MalformedRequest => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::InternalServerError => "Internal server error",
            Self::MalformedRequest => "Malformed request",
            Self::BadRequest | Self::UnsupportedMediaType | Self::InvalidRequest => {
                "Invalid request"
            }
            Self::NotFound => "Route not found",
            Self::MethodNotAllowed => "Method not allowed",
        }
    }

    /// Final segment of the type URI.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::InternalServerError => "internal-server-error",
            Self::MalformedRequest => "malformed-request",
            Self::BadRequest => "bad-request",
            Self::UnsupportedMediaType => "unsupported-media-type",
            Self::InvalidRequest => "invalid-request",
            Self::NotFound => "not-found",
            Self::MethodNotAllowed => "method-not-allowed",
        }
    }

    /// Full type URI, e.g. `https://mybils.io/problems/not-found`.
    #[must_use]
    pub fn type_uri(self) -> String {
        format!("{PROBLEM_BASE_URL}/problems/{}", self.slug())
    }

    /// Recovers the kind from a type URI.
    #[must_use]
    pub fn from_type_uri(uri: &str) -> Option<Self> {
        let slug = uri.strip_prefix(PROBLEM_BASE_URL)?.strip_prefix("/problems/")?;
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A structured, client-facing error.
///
/// Problems are plain values: constructing one has no side effects, and the
/// same inputs always produce the same payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{title}: {message}")]
pub struct Problem {
    /// HTTP status code.
    pub code: u16,
    /// Short summary of the category.
    pub title: String,
    /// Explanation specific to this occurrence.
    #[serde(rename = "detail")]
    pub message: String,
    /// Occurrence URI, always [`UNKNOWN_INSTANCE`].
    pub instance: String,
    /// Category URI under [`PROBLEM_BASE_URL`].
    #[serde(rename = "type")]
    pub type_uri: String,
    /// One sentence per violated field rule, in validation order.
    #[serde(
        rename = "fieldErrors",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub field_errors: Vec<String>,
}

impl Problem {
    fn new(kind: ProblemKind, message: impl Into<String>) -> Self {
        Self {
            code: kind.status().as_u16(),
            title: kind.title().to_string(),
            message: message.into(),
            instance: UNKNOWN_INSTANCE.to_string(),
            type_uri: kind.type_uri(),
            field_errors: Vec::new(),
        }
    }

    /// 500 with the default support message.
    #[must_use]
    pub fn internal_server_error() -> Self {
        Self::new(ProblemKind::InternalServerError, DEFAULT_INTERNAL_MESSAGE)
    }

    /// 500 carrying `message`; an empty message falls back to the default.
    #[must_use]
    pub fn internal_server_error_with(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            return Self::internal_server_error();
        }
        Self::new(ProblemKind::InternalServerError, message)
    }

    /// 422 for bodies that could not be decoded.
    #[must_use]
    pub fn malformed_request() -> Self {
        Self::new(ProblemKind::MalformedRequest, MALFORMED_MESSAGE)
    }

    /// 400 with a caller-supplied message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::BadRequest, message)
    }

    /// 415 with a caller-supplied message.
    #[must_use]
    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::UnsupportedMediaType, message)
    }

    /// 400 listing every rendered field violation.
    #[must_use]
    pub fn invalid_request(details: &[ValidationDetail]) -> Self {
        let mut problem = Self::new(ProblemKind::InvalidRequest, VALIDATION_MESSAGE);
        problem.field_errors = render_field_errors(details);
        problem
    }

    /// 404 for a path no pattern matches.
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        Self::new(
            ProblemKind::NotFound,
            format!("The route `{path}` does not exist"),
        )
    }

    /// 405 for a path whose pattern has no handler for `method`.
    #[must_use]
    pub fn method_not_allowed(path: &str, method: &Method) -> Self {
        Self::new(
            ProblemKind::MethodNotAllowed,
            format!("The method {method} is not allowed for route `{path}`"),
        )
    }

    /// The HTTP status, falling back to 500 for out-of-range codes.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// The category, if the type URI is one of ours.
    #[must_use]
    pub fn kind(&self) -> Option<ProblemKind> {
        ProblemKind::from_type_uri(&self.type_uri)
    }
}

/// One violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetail {
    /// Rule name, e.g. `required` or `oneof`.
    pub tag: String,
    /// Public field name, e.g. `Title`.
    pub field: String,
    /// Rule parameter, empty for parameterless rules.
    pub param: String,
}

impl ValidationDetail {
    /// Creates a detail.
    pub fn new(tag: impl Into<String>, field: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            field: field.into(),
            param: param.into(),
        }
    }

    /// Renders the sentence for this violation, or `None` for unknown tags.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        let field = &self.field;
        let param = &self.param;
        match self.tag.as_str() {
            "required" => Some(format!("{field} is required")),
            "email" => Some(format!("{field} is not valid email")),
            "gte" => Some(format!("{field} value must be greater than {param}")),
            "lte" => Some(format!("{field} value must be lower than {param}")),
            "oneof" => Some(format!(
                "{field} value must be one of the following: {}",
                format_one_of(param)
            )),
            _ => None,
        }
    }
}

/// Renders every known violation, dropping unknown tags.
#[must_use]
pub fn render_field_errors(details: &[ValidationDetail]) -> Vec<String> {
    details.iter().filter_map(ValidationDetail::render).collect()
}

/// Formats a `oneof` parameter as a readable list.
///
/// ```
/// use bills_core::problem::format_one_of;
///
/// assert_eq!(format_one_of("'CREDIT' 'DEBIT'"), "CREDIT or DEBIT");
/// assert_eq!(format_one_of("A B C"), "A, B or C");
/// assert_eq!(format_one_of("EUR"), "EUR");
/// ```
#[must_use]
pub fn format_one_of(param: &str) -> String {
    let joined = split_quoted(param).join(", ").replace('\'', "");
    match joined.rfind(',') {
        Some(index) => format!("{} or{}", &joined[..index], &joined[index + 1..]),
        None => joined,
    }
}

/// Splits on whitespace outside of quotes.
///
/// Both `'` and `"` delimit a quoted token; whitespace inside quotes is kept,
/// and so are the quote characters themselves.
#[must_use]
pub fn split_quoted(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match quote {
            Some(open) if ch == open => {
                quote = None;
                current.push(ch);
            }
            Some(_) => current.push(ch),
            None if ch == '\'' || ch == '"' => {
                quote = Some(ch);
                current.push(ch);
            }
            None if ch.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
