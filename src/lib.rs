//! # routecore
//!
//! **routecore** is the routing heart of an HTTP framework: a route pattern
//! compiler, a method+path matcher/dispatcher, and the inverse URL generator.
//!
//! ## Overview
//!
//! Route patterns are plain strings with named placeholders and optional
//! segments:
//!
//! ```text
//! /users/{id:\d+}[/posts[/{post_id:\d+}]]
//! ```
//!
//! - `{name}` matches any non-slash sequence and binds it to `name`
//! - `{name:regex}` constrains the placeholder with a regex
//! - `[...]` marks an optional segment; optional segments nest
//!
//! The same parsed token tree drives both directions: the [`router`] compiles
//! it into an anchored regex for matching, and the [`generator`] walks it in
//! reverse to substitute parameter values back into a concrete path.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - grammar parser and pattern compiler (shared by both
//!   directions)
//! - **[`route`]** - the immutable [`Route`] record and its bound attributes
//! - **[`collection`]** - route registration with group prefixes and
//!   middleware stacking; consumed into a frozen [`RouteTable`]
//! - **[`router`]** - request-time dispatch to
//!   `Matched | NotFound | MethodNotAllowed`
//! - **[`generator`]** - route-name + parameters back to a path or absolute URL
//! - **[`handler`]** - boundary traits the surrounding framework implements
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use http::Method;
//! use routecore::{RouteCollection, RouteResult, Router, UrlGenerator};
//! use routecore::handler::{HandlerRequest, HandlerResponse, RequestHandler};
//!
//! struct Hello;
//!
//! impl RequestHandler for Hello {
//!     fn handle(&self, _req: HandlerRequest) -> HandlerResponse {
//!         HandlerResponse::text(200, "hello")
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut collection = RouteCollection::new();
//! collection.get("/hello/{name:[a-z]+}", "hello", Arc::new(Hello), Vec::new());
//! let table = collection.build()?;
//!
//! let router = Router::new(table.clone())?;
//! match router.dispatch(&Method::GET, "/hello/world") {
//!     RouteResult::Matched(route) => assert_eq!(route.attribute("name"), Some("world")),
//!     _ => unreachable!(),
//! }
//!
//! let generator = UrlGenerator::new(table);
//! let path = generator.generate_path("hello", &[("name", "world".into())], &[])?;
//! assert_eq!(path, "/hello/world");
//! # Ok(())
//! # }
//! ```
//!
//! ## Lifecycle
//!
//! A [`RouteCollection`] is mutable only while routes are being registered.
//! [`RouteCollection::build`] consumes it, so mutation after the table has
//! been handed to a [`Router`] or [`UrlGenerator`] is a compile error rather
//! than a runtime one. The resulting [`RouteTable`] is `Arc`-backed and may
//! be cloned and shared across request-handling threads freely.
//!
//! Pattern compilation happens eagerly when a [`Router`] is constructed, so
//! malformed patterns and invalid constraint regexes fail at startup, never
//! during request handling. Request-time misses (`NotFound`,
//! `MethodNotAllowed`) are ordinary enum variants for the caller to render as
//! 404/405 responses.

pub mod collection;
pub mod generator;
pub mod handler;
pub mod pattern;
pub mod route;
pub mod router;

pub use collection::{RouteCollection, RouteCollectionError, RouteTable};
pub use generator::{ParamValue, UrlGenerator, UrlGeneratorError};
pub use handler::{HandlerRequest, HandlerResponse, Middleware, Request, RequestHandler};
pub use pattern::{CompiledPattern, PatternError, Token};
pub use route::{ParamVec, Route};
pub use router::{RouteResult, Router};
