//! Core middleware trait.
//!
//! A [`Middleware`] turns a handler into another handler. The wrapper it
//! returns may run code before and after delegating, or return an error
//! without delegating at all.
//!
//! # Example
//!
//! ```
//! use bills_core::{BoxFuture, BoxedHandler, BillsResult, Context, Handler};
//! use bills_middleware::Middleware;
//! use std::sync::Arc;
//!
//! struct Audit;
//!
//! struct Audited {
//!     next: BoxedHandler,
//! }
//!
//! impl Handler for Audited {
//!     fn call<'a>(&'a self, ctx: &'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>> {
//!         Box::pin(async move {
//!             ctx.logger().info("entering handler");
//!             self.next.call(ctx).await
//!         })
//!     }
//! }
//!
//! impl Middleware for Audit {
//!     fn name(&self) -> &'static str {
//!         "audit"
//!     }
//!
//!     fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
//!         Arc::new(Audited { next })
//!     }
//! }
//! ```

use bills_core::BoxedHandler;
use std::sync::Arc;

/// A type-erased middleware that can be stored in a vector.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// Handler-to-handler transformation.
///
/// # Invariants
///
/// - The returned handler SHOULD delegate to `next` at most once.
/// - Errors from `next` SHOULD propagate unchanged.
pub trait Middleware: Send + Sync + 'static {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Wraps `next`.
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

/// A middleware built from a closure. See [`middleware_fn`].
pub struct MiddlewareFn<F> {
    name: &'static str,
    f: F,
}

impl<F> std::fmt::Debug for MiddlewareFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Adapts a `BoxedHandler -> BoxedHandler` closure.
pub fn middleware_fn<F>(name: &'static str, f: F) -> MiddlewareFn<F>
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    MiddlewareFn { name, f }
}

impl<F> Middleware for MiddlewareFn<F>
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        (self.f)(next)
    }
}
