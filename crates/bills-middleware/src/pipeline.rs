//! Ordered middleware composition.
//!
//! Layers are applied so that the first one added is the outermost:
//! with `[A, B]` a request runs A-enter, B-enter, handler, B-exit, A-exit.

use crate::middleware::{BoxedMiddleware, Middleware};
use bills_core::BoxedHandler;
use std::sync::Arc;

/// An ordered list of middleware.
///
/// # Example
///
/// ```
/// use bills_middleware::stages::{JsonContentType, RequestTracing};
/// use bills_middleware::Pipeline;
///
/// let pipeline = Pipeline::new()
///     .with(RequestTracing::new("transactions"))
///     .with(JsonContentType);
///
/// assert_eq!(pipeline.names(), vec!["tracing", "json_content_type"]);
/// ```
#[derive(Clone, Default)]
pub struct Pipeline {
    layers: Vec<BoxedMiddleware>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("layers", &self.names())
            .finish()
    }
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware; it runs inside every layer added before it.
    #[must_use]
    pub fn with<M: Middleware>(mut self, middleware: M) -> Self {
        self.push(Arc::new(middleware));
        self
    }

    /// Appends an already boxed middleware.
    pub fn push(&mut self, middleware: BoxedMiddleware) {
        self.layers.push(middleware);
    }

    /// Wraps `handler` in every layer.
    pub fn apply(&self, handler: BoxedHandler) -> BoxedHandler {
        self.layers
            .iter()
            .rev()
            .fold(handler, |next, layer| layer.wrap(next))
    }

    /// Layer names, outermost first.
    pub fn names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
