use http::Method;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::collection::RouteTable;
use crate::handler::Request;
use crate::pattern::{CompiledPattern, PatternError};
use crate::route::{ParamVec, Route};

/// Outcome of one dispatch call.
#[derive(Debug)]
pub enum RouteResult {
    /// A route matched the method and path; placeholder values are bound as
    /// attributes on the carried copy.
    Matched(Route),
    /// No registered route's path shape matches the request path.
    NotFound,
    /// At least one route's path shape matches, but none for this method.
    /// Carries the sorted, deduplicated list of methods that do match.
    MethodNotAllowed(Vec<Method>),
}

/// Matches incoming `(method, path)` pairs against the frozen route table.
///
/// Construction compiles every route's pattern eagerly; a router that built
/// successfully can never fail at request time. Dispatch scans candidates in
/// registration order, so when two routes share a method and path shape the
/// earlier registration wins.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    compiled: Vec<Arc<CompiledPattern>>,
}

impl Router {
    /// Compile all routes in `table` into a dispatchable form.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] encountered; pattern errors are
    /// fatal configuration errors and belong at startup.
    pub fn new(table: RouteTable) -> Result<Self, PatternError> {
        let mut compiled = Vec::with_capacity(table.len());
        for route in &table {
            // Populates each route's shared compile cache as a side effect,
            // so the URL generator reuses the same compiled pattern.
            compiled.push(Arc::new(route.compiled()?.clone()));
        }

        info!(routes_count = table.len(), "route table compiled");

        Ok(Self { table, compiled })
    }

    /// Resolve a method and request path to a [`RouteResult`].
    ///
    /// The path is percent-decoded before matching; invalid escape sequences
    /// decode lossily rather than failing the request.
    #[must_use]
    pub fn dispatch(&self, method: &Method, path: &str) -> RouteResult {
        let decoded = decode_path(path);

        debug!(method = %method, path = %decoded, "route match attempt");

        let mut allowed: Vec<Method> = Vec::new();
        for (route, compiled) in self.table.iter().zip(&self.compiled) {
            let Some(captures) = compiled.regex().captures(&decoded) else {
                continue;
            };

            if route.method() != method {
                allowed.push(route.method().clone());
                continue;
            }

            let mut attributes = ParamVec::new();
            for name in compiled.placeholders() {
                // A placeholder inside an absent optional group captures
                // nothing and stays unbound.
                if let Some(value) = captures.name(name) {
                    attributes.push((Arc::from(name.as_str()), value.as_str().to_string()));
                }
            }

            debug!(
                method = %method,
                path = %decoded,
                route = %route.name(),
                pattern = %route.pattern(),
                attributes = ?attributes,
                "route matched"
            );

            return RouteResult::Matched(route.with_attributes(attributes));
        }

        if allowed.is_empty() {
            warn!(method = %method, path = %decoded, "no route matched");
            return RouteResult::NotFound;
        }

        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        allowed.dedup();

        debug!(
            method = %method,
            path = %decoded,
            allowed = ?allowed,
            "path shape matched for other methods only"
        );

        RouteResult::MethodNotAllowed(allowed)
    }

    /// Dispatch straight from a request abstraction.
    #[must_use]
    pub fn dispatch_request<R: Request>(&self, request: &R) -> RouteResult {
        self.dispatch(&request.method(), request.path())
    }

    /// The table this router was built from.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}

/// Percent-decode a request path. Never fails: sequences that do not decode
/// to UTF-8 are replaced rather than rejected, so a garbage path falls
/// through to `NotFound` instead of erroring.
fn decode_path(path: &str) -> Cow<'_, str> {
    match urlencoding::decode(path) {
        Ok(decoded) => decoded,
        Err(_) => {
            let bytes = urlencoding::decode_binary(path.as_bytes());
            Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
