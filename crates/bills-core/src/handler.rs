//! Handler trait for request processing.
//!
//! A [`Handler`] receives the request [`Context`], writes its response
//! through it, and reports failure as a [`BillsError`](crate::BillsError).
//! Handlers are stored type-erased as [`BoxedHandler`] so routes and
//! middleware layers can be composed freely.

use crate::{BillsResult, Context};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed future that is `Send`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A shareable, type-erased handler.
pub type BoxedHandler = Arc<dyn Handler>;

/// Processes one request.
///
/// # Example
///
/// ```
/// use bills_core::{handler_fn, ContextExt, Handler};
/// use http::StatusCode;
///
/// let health = handler_fn(|ctx| {
///     Box::pin(async move { ctx.write_response(StatusCode::OK, &"up") })
/// });
/// # let _: &dyn Handler = &health;
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Runs the handler against `ctx`.
    fn call<'a>(&'a self, ctx: &'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>>;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn call<'a>(&'a self, ctx: &'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>> {
        (**self).call(ctx)
    }
}

/// A handler built from a closure. See [`handler_fn`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> std::fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

/// Wraps a closure returning a boxed future as a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>> + Send + Sync + 'static,
{
    HandlerFn { f }
}

impl<F> Handler for HandlerFn<F>
where
    F: for<'a> Fn(&'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>> + Send + Sync + 'static,
{
    fn call<'a>(&'a self, ctx: &'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>> {
        (self.f)(ctx)
    }
}

/// Erases a handler's type.
pub fn boxed<H: Handler>(handler: H) -> BoxedHandler {
    Arc::new(handler)
}
