//! The immutable [`Route`] record.
//!
//! A route is created once during table construction and read many times at
//! request time. Its identity (`name`) and pattern never change; the only
//! varying part is the attribute set, and that varies exclusively through
//! [`Route::with_attributes`], which returns a bound copy.

use http::Method;
use once_cell::sync::OnceCell;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::handler::{Middleware, RequestHandler};
use crate::pattern::{compile, CompiledPattern, PatternError};

/// Maximum number of bound attributes before heap allocation.
/// Most routes carry well under eight placeholders.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated attribute storage.
///
/// Names are `Arc<str>` because they come from the static pattern and are
/// shared across every match of the same route; values are per-request
/// strings extracted from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// One dispatch target: a `(method, pattern, name, handler, middlewares)`
/// tuple plus an opaque options bag.
///
/// The handler and middleware references are stored, never invoked; the
/// surrounding framework drives them. Cloning a route is cheap: handler and
/// middlewares are shared via `Arc`.
#[derive(Clone)]
pub struct Route {
    name: String,
    method: Method,
    pattern: String,
    options: HashMap<String, String>,
    handler: Arc<dyn RequestHandler>,
    middlewares: Vec<Arc<dyn Middleware>>,
    attributes: ParamVec,
    compiled: OnceCell<Arc<CompiledPattern>>,
}

impl Route {
    pub(crate) fn new(
        pattern: String,
        options: HashMap<String, String>,
        method: Method,
        name: String,
        handler: Arc<dyn RequestHandler>,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> Self {
        Self {
            name,
            method,
            pattern,
            options,
            handler,
            middlewares,
            attributes: ParamVec::new(),
            compiled: OnceCell::new(),
        }
    }

    /// Unique route name, the identity used for URL generation lookups.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// HTTP method this route answers.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Raw pattern string, with any enclosing group prefixes already applied.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Opaque key-value bag attached at registration, e.g. placeholder
    /// constraint overrides interpreted by the embedding framework.
    #[must_use]
    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }

    /// The handler this route dispatches to. Opaque to the routing core.
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn RequestHandler> {
        &self.handler
    }

    /// Middlewares in execution order: outer groups first, then inner groups,
    /// then the route's own.
    #[must_use]
    pub fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }

    /// Attributes bound by a successful match; empty until then.
    #[must_use]
    pub fn attributes(&self) -> &ParamVec {
        &self.attributes
    }

    /// Look up one bound attribute by placeholder name.
    ///
    /// Last write wins if the same name was bound twice.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Return a copy of this route with the given attributes bound.
    ///
    /// The receiver is left untouched; matched placeholder values only ever
    /// live on the returned copy.
    #[must_use]
    pub fn with_attributes(&self, attributes: ParamVec) -> Self {
        let mut bound = self.clone();
        bound.attributes = attributes;
        bound
    }

    /// The compiled form of this route's pattern.
    ///
    /// Built on first use and cached for the route's lifetime. Concurrent
    /// first use from multiple threads is safe: the cell guarantees a single
    /// stored value.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the pattern or one of its constraints is
    /// invalid.
    pub fn compiled(&self) -> Result<&CompiledPattern, PatternError> {
        self.compiled
            .get_or_try_init(|| compile(&self.pattern).map(Arc::new))
            .map(|compiled| compiled.as_ref())
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("options", &self.options)
            .field("middlewares", &self.middlewares.len())
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.pattern, self.name)
    }
}
