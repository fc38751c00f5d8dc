//! # Bills Middleware
//!
//! Middleware composition for the Bills framework.
//!
//! A [`Middleware`] is a transformation from one handler to another. A
//! [`Pipeline`] applies an ordered list of them so that the first one added
//! is the outermost layer:
//!
//! ```text
//! A-enter → B-enter → handler → B-exit → A-exit
//! ```
//!
//! Any layer may answer with an error instead of delegating; errors travel
//! back out through the remaining layers untouched and are rendered by the
//! dispatcher.
//!
//! ## Built-in stages
//!
//! | Stage | Purpose |
//! |-------|---------|
//! | [`stages::RequestTracing`] | Span per request with method, path, request id |
//! | [`stages::JsonContentType`] | Reject bodies not declared as `application/json` |

#![doc(html_root_url = "https://docs.rs/bills-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod middleware;
mod pipeline;
pub mod stages;

pub use middleware::{middleware_fn, BoxedMiddleware, Middleware, MiddlewareFn};
pub use pipeline::Pipeline;
