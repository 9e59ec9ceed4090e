//! Boundary traits and types the surrounding framework implements.
//!
//! The routing core stores handler and middleware references on each route
//! but never invokes them; it only needs their identity, and for middlewares
//! the capability expressed by the [`Middleware`] trait bound. Passing a
//! value that is not a middleware is a compile error, not a runtime check.

use http::Method;
use std::collections::HashMap;

/// Minimal view of an incoming request consumed by this crate.
///
/// `scheme` and `authority` are only read for absolute URL generation.
pub trait Request {
    /// HTTP method, e.g. `GET`.
    fn method(&self) -> Method;
    /// Request path, percent-encoded or already decoded; the matcher decodes
    /// before matching either way.
    fn path(&self) -> &str;
    /// URI scheme, e.g. `https`.
    fn scheme(&self) -> &str;
    /// Authority component, e.g. `user:password@localhost:8443`.
    fn authority(&self) -> &str;
}

/// Request data the framework hands to a matched route's handler.
///
/// Carries the attributes bound by the matcher; this is the sink through
/// which matched placeholder values reach request handling.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// HTTP method of the incoming request.
    pub method: Method,
    /// Decoded request path.
    pub path: String,
    /// Placeholder name to matched value, as bound by the matcher.
    pub attributes: HashMap<String, String>,
}

/// Response produced by a handler or short-circuiting middleware.
#[derive(Debug, Clone, Default)]
pub struct HandlerResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HandlerResponse {
    /// Plain-text response shortcut, mostly for examples and tests.
    #[must_use]
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: body.as_bytes().to_vec(),
        }
    }
}

/// Terminal request-handling logic a route dispatches to.
pub trait RequestHandler: Send + Sync {
    fn handle(&self, req: HandlerRequest) -> HandlerResponse;
}

/// Processing hooks that wrap a route's handler.
///
/// `before` may short-circuit with a response; `after` may rewrite the
/// response on the way out. Both default to no-ops so implementations
/// override only the side they need.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse) {}
}
