//! # Bills
//!
//! **A small HTTP framework for JSON services.**
//!
//! - Path patterns with `:name` parameters, resolved to 404/405 problems
//! - RFC 7807 problem responses for every failure
//! - Declarative body validation through `#[derive(Validate)]`
//! - Handler-to-handler middleware pipelines
//! - Pooled per-request contexts over a hyper transport
//!
//! ## Quick Start
//!
//! ```
//! use bills::prelude::*;
//! use bytes::Bytes;
//! use http::{Request, StatusCode};
//!
//! # tokio_test::block_on(async {
//! let router = Router::new().get(
//!     "/accounts/:id",
//!     handler_fn(|ctx| {
//!         Box::pin(async move {
//!             let id = param_value("/accounts/:id", ctx.path(), "id").unwrap_or_default();
//!             let id = id.to_string();
//!             ctx.write_response(StatusCode::OK, &id)
//!         })
//!     }),
//! );
//! let server = RestServer::builder()
//!     .use_middleware(RequestTracing::new("accounts"))
//!     .router(router)
//!     .build();
//!
//! let request = Request::get("/accounts/7").body(Bytes::new()).unwrap();
//! let response = server.handle(request).await;
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(response.body().as_ref(), b"\"7\"");
//! # });
//! ```
//!
//! ## Request flow
//!
//! ```text
//! Request → RouteTable → Pipeline (first registered runs outermost) → Handler
//!                                                                      ↓
//! Response ← Problem rendering ← Context response buffer ←─────────────┘
//! ```
//!
//! `#[derive(Validate)]` expands to paths under `bills_core`, so crates that
//! use the derive also depend on `bills-core` directly.

#![doc(html_root_url = "https://docs.rs/bills/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use bills_core as core;

// Re-export router types
pub use bills_router as router;

// Re-export middleware types
pub use bills_middleware as middleware;

// Re-export server types
pub use bills_server as server;

// Re-export telemetry types
pub use bills_telemetry as telemetry;

// Re-export configuration types
pub use bills_config as config;

// Re-export the validation derive
pub use bills_macros::Validate;

/// Prelude module for convenient imports.
///
/// ```
/// use bills::prelude::*;
///
/// let problem = Problem::bad_request("no");
/// assert_eq!(problem.kind(), Some(ProblemKind::BadRequest));
/// ```
pub mod prelude {
    pub use bills_core::{
        handler_fn, BillsError, BillsResult, Binder, BoxFuture, BoxedHandler, Context, ContextExt,
        Handler, Logger, Problem, ProblemKind, Validate, ValidationDetail, Validator,
    };

    pub use bills_macros::Validate;

    pub use bills_router::{param_value, RouteStatus, RouteTable};

    pub use bills_middleware::stages::{JsonContentType, RequestTracing};
    pub use bills_middleware::{middleware_fn, Middleware, Pipeline};

    pub use bills_server::{RestServer, Router, ServerConfig, ShutdownSignal};

    pub use bills_config::{BillsConfig, ConfigLoader};
    pub use bills_telemetry::{init_logging, LogConfig};
}
