//! # Router Module
//!
//! Request-time matching of `(method, path)` against the frozen route table.
//!
//! ## Overview
//!
//! The router is built once at startup from a [`RouteTable`](crate::RouteTable):
//! every route's pattern is compiled into an anchored regex, so malformed
//! patterns and bad constraints fail here, never during request handling.
//!
//! Each dispatch has exactly three outcomes:
//!
//! - [`RouteResult::Matched`] - a route matched both shape and method;
//!   placeholder values are bound on a copy of the route
//! - [`RouteResult::NotFound`] - no route's path shape matches at all (404)
//! - [`RouteResult::MethodNotAllowed`] - the path shape is known but not for
//!   this method; carries the sorted list of methods that do match, for the
//!   `Allow` header of a 405 response
//!
//! Misses are plain enum variants, not errors: the caller renders them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use http::Method;
//! use routecore::{RouteResult, Router};
//!
//! let router = Router::new(table)?;
//! match router.dispatch(&Method::GET, "/pets/123") {
//!     RouteResult::Matched(route) => println!("id = {:?}", route.attribute("id")),
//!     RouteResult::NotFound => println!("404"),
//!     RouteResult::MethodNotAllowed(allowed) => println!("405, allow {allowed:?}"),
//! }
//! ```

mod core;

pub use core::{RouteResult, Router};
