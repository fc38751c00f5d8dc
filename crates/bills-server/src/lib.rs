//! # Bills Server
//!
//! Dispatcher and HTTP transport for the Bills framework.
//!
//! - [`Router`] collects handlers per pattern and method
//! - [`RestServer`] pre-composes them with the middleware pipeline and
//!   dispatches requests using pooled [`HttpContext`]s
//! - [`transport::serve`] runs HTTP/1.1 over hyper with graceful shutdown
//!
//! ## Example
//!
//! ```rust,no_run
//! use bills_core::{handler_fn, ContextExt};
//! use bills_server::{RestServer, Router, ServerConfig, ShutdownSignal};
//! use http::StatusCode;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::new().get(
//!         "/health",
//!         handler_fn(|ctx| Box::pin(async move { ctx.write_response(StatusCode::OK, &"up") })),
//!     );
//!
//!     let server = RestServer::builder()
//!         .config(ServerConfig::builder().bind_address("127.0.0.1:8080").build())
//!         .router(router)
//!         .build();
//!
//!     Arc::new(server).start(ShutdownSignal::with_os_signals()).await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/bills-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod context;
mod error;
mod pool;
mod server;
mod shutdown;
pub mod transport;

pub use config::{
    ServerConfig, ServerConfigBuilder, DEFAULT_BIND_ADDRESS, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_POOL_CAPACITY, DEFAULT_SERVICE_NAME, DEFAULT_SHUTDOWN_TIMEOUT_SECS,
};
pub use context::HttpContext;
pub use error::ServerError;
pub use pool::{ContextPool, PooledContext};
pub use server::{RestServer, RestServerBuilder, Router};
pub use shutdown::{ConnectionToken, ConnectionTracker, ShutdownSignal};
