//! # Bills Core
//!
//! Core types and traits for the Bills HTTP framework.
//!
//! - [`Problem`] - Client-facing error taxonomy and its wire format
//! - [`BillsError`] - Handler error (typed problem or opaque failure)
//! - [`validate`] - Static validation tables and the [`Validator`]
//! - [`Binder`] - JSON body decoding plus validation
//! - [`Context`] / [`ContextExt`] - Per-request capability handed to handlers
//! - [`Handler`] - Type-erased async request handler
//! - [`Logger`] - Application logger exposed through the context

#![doc(html_root_url = "https://docs.rs/bills-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binder;
mod context;
mod error;
mod handler;
mod logger;
pub mod problem;
pub mod validate;

pub use binder::Binder;
pub use context::{json_response, problem_response, Context, ContextExt, APPLICATION_JSON};
pub use error::{BillsError, BillsResult};
pub use handler::{boxed, handler_fn, BoxFuture, BoxedHandler, Handler, HandlerFn};
pub use logger::Logger;
pub use problem::{Problem, ProblemKind, ValidationDetail};
pub use validate::{FieldDescriptor, FieldValue, Rule, Validate, Validator};
