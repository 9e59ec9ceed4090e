use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::handler::{Middleware, RequestHandler};
use crate::route::Route;

/// Table-state error during route registration.
///
/// These are programmer errors in the routing configuration and are expected
/// to abort startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteCollectionError {
    /// `end()` was called with no matching open `group()`.
    EndWithoutGroup,
    /// `build()` was called while group frames were still open.
    UnclosedGroup {
        /// Number of frames left open.
        open: usize,
    },
}

impl fmt::Display for RouteCollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteCollectionError::EndWithoutGroup => {
                write!(f, "end() called with no open route group")
            }
            RouteCollectionError::UnclosedGroup { open } => {
                write!(f, "{open} route group(s) still open at build time")
            }
        }
    }
}

impl std::error::Error for RouteCollectionError {}

/// Mutable route registration phase.
///
/// Registration order is preserved and is also the matcher's candidate
/// order. Registering a second route under an existing name replaces the
/// earlier one in place - last registration wins, silently, without
/// disturbing the table position of the name.
#[derive(Default)]
pub struct RouteCollection {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
    pattern_stack: Vec<String>,
    middleware_stack: Vec<Vec<Arc<dyn Middleware>>>,
}

impl RouteCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a group frame: every route registered until the matching
    /// [`end`](Self::end) gets `pattern` prepended to its own pattern and
    /// `middlewares` prepended to its middleware list.
    ///
    /// Groups nest; outer frames apply before inner ones.
    pub fn group(&mut self, pattern: &str, middlewares: Vec<Arc<dyn Middleware>>) -> &mut Self {
        self.pattern_stack.push(pattern.to_string());
        self.middleware_stack.push(middlewares);
        self
    }

    /// Close the innermost open group frame.
    ///
    /// # Errors
    ///
    /// [`RouteCollectionError::EndWithoutGroup`] when no frame is open.
    pub fn end(&mut self) -> Result<&mut Self, RouteCollectionError> {
        if self.pattern_stack.pop().is_none() {
            return Err(RouteCollectionError::EndWithoutGroup);
        }
        self.middleware_stack.pop();
        Ok(self)
    }

    pub fn delete(
        &mut self,
        pattern: &str,
        name: &str,
        handler: Arc<dyn RequestHandler>,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> &mut Self {
        self.route(Method::DELETE, pattern, name, handler, middlewares, HashMap::new())
    }

    pub fn get(
        &mut self,
        pattern: &str,
        name: &str,
        handler: Arc<dyn RequestHandler>,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> &mut Self {
        self.route(Method::GET, pattern, name, handler, middlewares, HashMap::new())
    }

    pub fn head(
        &mut self,
        pattern: &str,
        name: &str,
        handler: Arc<dyn RequestHandler>,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> &mut Self {
        self.route(Method::HEAD, pattern, name, handler, middlewares, HashMap::new())
    }

    pub fn options(
        &mut self,
        pattern: &str,
        name: &str,
        handler: Arc<dyn RequestHandler>,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> &mut Self {
        self.route(Method::OPTIONS, pattern, name, handler, middlewares, HashMap::new())
    }

    pub fn patch(
        &mut self,
        pattern: &str,
        name: &str,
        handler: Arc<dyn RequestHandler>,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> &mut Self {
        self.route(Method::PATCH, pattern, name, handler, middlewares, HashMap::new())
    }

    pub fn post(
        &mut self,
        pattern: &str,
        name: &str,
        handler: Arc<dyn RequestHandler>,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> &mut Self {
        self.route(Method::POST, pattern, name, handler, middlewares, HashMap::new())
    }

    pub fn put(
        &mut self,
        pattern: &str,
        name: &str,
        handler: Arc<dyn RequestHandler>,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> &mut Self {
        self.route(Method::PUT, pattern, name, handler, middlewares, HashMap::new())
    }

    /// Register a route under any supported method, with an options bag.
    ///
    /// The effective pattern is the concatenation of every open group prefix
    /// followed by `pattern`; the effective middleware list is every open
    /// group's middlewares (outermost first) followed by `middlewares`.
    pub fn route(
        &mut self,
        method: Method,
        pattern: &str,
        name: &str,
        handler: Arc<dyn RequestHandler>,
        middlewares: Vec<Arc<dyn Middleware>>,
        options: HashMap<String, String>,
    ) -> &mut Self {
        let effective_pattern = self.effective_pattern(pattern);
        let effective_middlewares = self.effective_middlewares(middlewares);

        let route = Route::new(
            effective_pattern,
            options,
            method,
            name.to_string(),
            handler,
            effective_middlewares,
        );

        match self.by_name.get(name) {
            Some(&index) => {
                debug!(name = %name, pattern = %route.pattern(), "route re-registered, replacing earlier registration");
                self.routes[index] = route;
            }
            None => {
                debug!(name = %name, method = %route.method(), pattern = %route.pattern(), "route registered");
                self.by_name.insert(name.to_string(), self.routes.len());
                self.routes.push(route);
            }
        }

        self
    }

    /// Freeze the collection into an immutable, shareable [`RouteTable`].
    ///
    /// # Errors
    ///
    /// [`RouteCollectionError::UnclosedGroup`] when a `group()` was never
    /// closed with `end()`.
    pub fn build(self) -> Result<RouteTable, RouteCollectionError> {
        if !self.pattern_stack.is_empty() {
            return Err(RouteCollectionError::UnclosedGroup {
                open: self.pattern_stack.len(),
            });
        }

        info!(routes_count = self.routes.len(), "route table frozen");

        Ok(RouteTable {
            inner: Arc::new(TableInner {
                routes: self.routes,
                by_name: self.by_name,
            }),
        })
    }

    fn effective_pattern(&self, pattern: &str) -> String {
        let mut effective =
            String::with_capacity(self.pattern_stack.iter().map(String::len).sum::<usize>() + pattern.len());
        for prefix in &self.pattern_stack {
            effective.push_str(prefix);
        }
        effective.push_str(pattern);
        effective
    }

    fn effective_middlewares(
        &self,
        own: Vec<Arc<dyn Middleware>>,
    ) -> Vec<Arc<dyn Middleware>> {
        let mut middlewares: Vec<Arc<dyn Middleware>> = Vec::new();
        for frame in &self.middleware_stack {
            middlewares.extend(frame.iter().cloned());
        }
        middlewares.extend(own);
        middlewares
    }
}

impl fmt::Debug for RouteCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteCollection")
            .field("routes", &self.routes)
            .field("pattern_stack", &self.pattern_stack)
            .field("open_groups", &self.middleware_stack.len())
            .finish()
    }
}

#[derive(Debug)]
struct TableInner {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
}

/// Frozen, name-keyed route table in registration order.
///
/// Cheap to clone (`Arc`-backed) and safe to read concurrently from any
/// number of threads; there is no way to mutate it after construction.
#[derive(Debug, Clone)]
pub struct RouteTable {
    inner: Arc<TableInner>,
}

impl RouteTable {
    /// Look up a route by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.inner
            .by_name
            .get(name)
            .map(|&index| &self.inner.routes[index])
    }

    /// Routes in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.inner.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, route) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{route}")?;
        }
        Ok(())
    }
}
