//! The route table.
//!
//! [`RouteTable`] maps patterns to [`MethodRouter`]s and resolves a request
//! path and method with a linear scan over the registered patterns.

use crate::matcher::{matches, split_path};
use crate::MethodRouter;
use http::Method;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Bare outcome of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteStatus {
    /// A handler was found.
    Matched,
    /// No pattern matches the path.
    PathNotFound,
    /// A pattern matches, but not for this method.
    MethodNotAllowed,
}

/// Result of [`RouteTable::resolve`].
#[derive(Debug)]
pub enum Resolution<'a, H> {
    /// The handler to run.
    Matched(&'a H),
    /// No pattern matches the path.
    PathNotFound,
    /// A pattern matches, but not for this method.
    MethodNotAllowed,
}

impl<'a, H> Resolution<'a, H> {
    /// The bare status.
    #[must_use]
    pub const fn status(&self) -> RouteStatus {
        match self {
            Self::Matched(_) => RouteStatus::Matched,
            Self::PathNotFound => RouteStatus::PathNotFound,
            Self::MethodNotAllowed => RouteStatus::MethodNotAllowed,
        }
    }

    /// The handler, when matched.
    #[must_use]
    pub const fn handler(&self) -> Option<&'a H> {
        match self {
            Self::Matched(handler) => Some(handler),
            Self::PathNotFound | Self::MethodNotAllowed => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Route<H> {
    // `true` for literal segments, compared left to right when patterns overlap.
    shape: SmallVec<[bool; 8]>,
    methods: MethodRouter<H>,
}

impl<H> Route<H> {
    fn new(pattern: &str) -> Self {
        Self {
            shape: pattern.split('/').map(|segment| !segment.starts_with(':')).collect(),
            methods: MethodRouter::new(),
        }
    }
}

/// Pattern → method → handler.
///
/// Built once at startup and only read afterwards, so a shared reference can
/// be used from any number of tasks.
///
/// When several patterns match one path, the most specific one owns it:
/// segments are compared from the left and a literal outranks a parameter.
/// Patterns of the same shape resolve in registration order. The method is
/// looked up on that pattern only.
///
/// # Example
///
/// ```rust
/// use bills_router::{Resolution, RouteStatus, RouteTable};
/// use http::Method;
///
/// let table = RouteTable::new()
///     .get("/transactions", "list")
///     .post("/transactions", "create")
///     .get("/transactions/:id", "find");
///
/// assert!(matches!(table.resolve("/transactions/9", &Method::GET), Resolution::Matched(&"find")));
/// assert_eq!(table.resolve("/transactions", &Method::PUT).status(), RouteStatus::MethodNotAllowed);
/// assert_eq!(table.resolve("/nothing", &Method::GET).status(), RouteStatus::PathNotFound);
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: IndexMap<String, Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            routes: IndexMap::new(),
        }
    }
}

impl<H> RouteTable<H> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `pattern` and `method`.
    ///
    /// Returns the handler previously registered for the same pair, which is
    /// replaced.
    pub fn register(&mut self, pattern: impl Into<String>, method: Method, handler: H) -> Option<H> {
        let pattern = pattern.into();
        self.routes
            .entry(pattern)
            .or_insert_with_key(|pattern| Route::new(pattern))
            .methods
            .insert(method, handler)
    }

    /// Registers a handler for any method.
    #[must_use]
    pub fn route(mut self, method: Method, pattern: impl Into<String>, handler: H) -> Self {
        self.register(pattern, method, handler);
        self
    }

    /// Registers a GET handler.
    #[must_use]
    pub fn get(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::GET, pattern, handler)
    }

    /// Registers a POST handler.
    #[must_use]
    pub fn post(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::POST, pattern, handler)
    }

    /// Registers a PUT handler.
    #[must_use]
    pub fn put(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::PUT, pattern, handler)
    }

    /// Registers a PATCH handler.
    #[must_use]
    pub fn patch(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::PATCH, pattern, handler)
    }

    /// Registers a DELETE handler.
    #[must_use]
    pub fn delete(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Looks up the handler for `path` and `method`.
    pub fn resolve(&self, path: &str, method: &Method) -> Resolution<'_, H> {
        let segments = split_path(path);
        let mut best: Option<&Route<H>> = None;

        for (pattern, route) in &self.routes {
            if !matches(&segments, pattern) {
                continue;
            }
            let better = best.map_or(true, |current| {
                route.shape.as_slice().cmp(current.shape.as_slice()) == Ordering::Greater
            });
            if better {
                best = Some(route);
            }
        }

        match best {
            None => Resolution::PathNotFound,
            Some(route) => match route.methods.handler(method) {
                Some(handler) => Resolution::Matched(handler),
                None => Resolution::MethodNotAllowed,
            },
        }
    }

    /// The methods registered for the patterns matching `path`.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let segments = split_path(path);
        let mut allowed: Vec<Method> = Vec::new();
        for (pattern, route) in &self.routes {
            if matches(&segments, pattern) {
                for method in route.methods.methods() {
                    if !allowed.contains(method) {
                        allowed.push(method.clone());
                    }
                }
            }
        }
        allowed
    }

    /// Registered `(pattern, method)` pairs, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &Method)> {
        self.routes.iter().flat_map(|(pattern, route)| {
            route
                .methods
                .methods()
                .map(move |method| (pattern.as_str(), method))
        })
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Converts every handler with `f`, keeping patterns and order.
    pub fn map_handlers<H2>(self, mut f: impl FnMut(H) -> H2) -> RouteTable<H2> {
        RouteTable {
            routes: self
                .routes
                .into_iter()
                .map(|(pattern, route)| {
                    let methods = route.methods.map(&mut f);
                    (
                        pattern,
                        Route {
                            shape: route.shape,
                            methods,
                        },
                    )
                })
                .collect(),
        }
    }
}
