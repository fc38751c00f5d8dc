//! Recycling of request contexts.
//!
//! [`ContextPool::acquire`] hands out a [`PooledContext`] guard with exclusive
//! ownership of an [`HttpContext`]. Dropping the guard clears the context and
//! returns it to the pool, whatever way the request ended.

use crate::HttpContext;
use bills_core::{Binder, Logger};
use bytes::Bytes;
use http::Request;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Pool of idle [`HttpContext`]s.
///
/// At most `capacity` idle contexts are kept; extra ones are dropped on
/// release. The pool never blocks: an empty pool allocates a new context.
#[derive(Debug)]
pub struct ContextPool {
    idle: Mutex<Vec<HttpContext>>,
    capacity: usize,
    allocated: AtomicUsize,
    logger: Logger,
    binder: Arc<Binder>,
}

impl ContextPool {
    /// Creates an empty pool.
    pub fn new(capacity: usize, logger: Logger, binder: Arc<Binder>) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            capacity,
            allocated: AtomicUsize::new(0),
            logger,
            binder,
        }
    }

    /// Takes an idle context (or allocates one) and binds `request` to it.
    pub fn acquire(&self, request: Request<Bytes>) -> PooledContext<'_> {
        let recycled = self.idle.lock().pop();
        let mut context = recycled.unwrap_or_else(|| {
            self.allocated.fetch_add(1, Ordering::Relaxed);
            HttpContext::new(self.logger.clone(), Arc::clone(&self.binder))
        });
        context.reset(request);
        PooledContext {
            pool: self,
            context: Some(context),
        }
    }

    fn release(&self, mut context: HttpContext) {
        context.clear();
        let mut idle = self.idle.lock();
        if idle.len() < self.capacity {
            idle.push(context);
        }
    }

    /// Number of idle contexts.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    /// Number of contexts ever allocated.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }

    /// Maximum number of idle contexts.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Exclusive handle on a pooled context; releases it on drop.
#[derive(Debug)]
pub struct PooledContext<'a> {
    pool: &'a ContextPool,
    context: Option<HttpContext>,
}

impl Deref for PooledContext<'_> {
    type Target = HttpContext;

    fn deref(&self) -> &HttpContext {
        self.context.as_ref().expect("context is held until drop")
    }
}

impl DerefMut for PooledContext<'_> {
    fn deref_mut(&mut self) -> &mut HttpContext {
        self.context.as_mut().expect("context is held until drop")
    }
}

impl Drop for PooledContext<'_> {
    fn drop(&mut self) {
        if let Some(context) = self.context.take() {
            self.pool.release(context);
        }
    }
}
