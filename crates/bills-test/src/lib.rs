//! # Bills Test
//!
//! In-memory test utilities for Bills services.
//!
//! - [`TestContext`] is a [`Context`](bills_core::Context) double for calling
//!   handlers and middleware directly
//! - [`TestClient`] drives a whole [`RestServer`](bills_server::RestServer)
//!   without binding a port
//! - [`TestResponse`] wraps the result with JSON and problem assertions
//!
//! ```
//! use bills_core::ProblemKind;
//! use bills_server::{RestServer, Router};
//! use bills_test::TestClient;
//!
//! # tokio_test::block_on(async {
//! let client = TestClient::new(RestServer::builder().router(Router::new()).build());
//! client.get("/nothing").send().await.assert_problem(ProblemKind::NotFound);
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/bills-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod context;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use context::TestContext;
pub use error::TestError;
pub use request::TestRequestBuilder;
pub use response::TestResponse;
