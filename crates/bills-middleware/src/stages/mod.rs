//! Built-in middleware stages.

pub mod json;
pub mod tracing;

pub use json::JsonContentType;
pub use self::tracing::RequestTracing;
