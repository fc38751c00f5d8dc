//! Per-pattern method dispatch.
//!
//! [`MethodRouter`] maps HTTP methods to handlers for a single route pattern.

use http::Method;
use smallvec::SmallVec;

/// Maps HTTP methods to handlers for one pattern.
///
/// # Example
///
/// ```rust
/// use bills_router::MethodRouter;
/// use http::Method;
///
/// let router = MethodRouter::new().get("find").post("create");
///
/// assert_eq!(router.handler(&Method::GET), Some(&"find"));
/// assert_eq!(router.handler(&Method::POST), Some(&"create"));
/// assert_eq!(router.handler(&Method::DELETE), None);
/// ```
#[derive(Debug, Clone)]
pub struct MethodRouter<H> {
    entries: SmallVec<[(Method, H); 4]>,
}

impl<H> Default for MethodRouter<H> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<H> MethodRouter<H> {
    /// Creates an empty method router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a GET handler.
    #[must_use]
    pub fn get(self, handler: H) -> Self {
        self.method(Method::GET, handler)
    }

    /// Registers a POST handler.
    #[must_use]
    pub fn post(self, handler: H) -> Self {
        self.method(Method::POST, handler)
    }

    /// Registers a PUT handler.
    #[must_use]
    pub fn put(self, handler: H) -> Self {
        self.method(Method::PUT, handler)
    }

    /// Registers a PATCH handler.
    #[must_use]
    pub fn patch(self, handler: H) -> Self {
        self.method(Method::PATCH, handler)
    }

    /// Registers a DELETE handler.
    #[must_use]
    pub fn delete(self, handler: H) -> Self {
        self.method(Method::DELETE, handler)
    }

    /// Registers a handler for any method.
    #[must_use]
    pub fn method(mut self, method: Method, handler: H) -> Self {
        self.insert(method, handler);
        self
    }

    /// Inserts a handler, returning the one it replaced.
    pub fn insert(&mut self, method: Method, handler: H) -> Option<H> {
        match self.entries.iter_mut().find(|(existing, _)| *existing == method) {
            Some((_, slot)) => Some(std::mem::replace(slot, handler)),
            None => {
                self.entries.push((method, handler));
                None
            }
        }
    }

    /// The handler for `method`.
    #[must_use]
    pub fn handler(&self, method: &Method) -> Option<&H> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == method)
            .map(|(_, handler)| handler)
    }

    /// Registered methods, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.entries.iter().map(|(method, _)| method)
    }

    /// Number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no method is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts every handler with `f`.
    pub fn map<H2>(self, mut f: impl FnMut(H) -> H2) -> MethodRouter<H2> {
        MethodRouter {
            entries: self
                .entries
                .into_iter()
                .map(|(method, handler)| (method, f(handler)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites() {
        let mut router = MethodRouter::new().get(1);
        assert_eq!(router.insert(Method::GET, 2), Some(1));
        assert_eq!(router.handler(&Method::GET), Some(&2));
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_extension_method() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        let router = MethodRouter::new().method(purge.clone(), "purge");
        assert_eq!(router.handler(&purge), Some(&"purge"));
    }

    #[test]
    fn test_methods_in_registration_order() {
        let router = MethodRouter::new().post(1).get(2).delete(3);
        let methods: Vec<_> = router.methods().cloned().collect();
        assert_eq!(methods, vec![Method::POST, Method::GET, Method::DELETE]);
    }

    #[test]
    fn test_map() {
        let router = MethodRouter::new().get(2).map(|n| n * 10);
        assert_eq!(router.handler(&Method::GET), Some(&20));
    }
}
