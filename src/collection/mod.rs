//! # Collection Module
//!
//! Route registration and the frozen route table.
//!
//! ## Two phases
//!
//! [`RouteCollection`] is the mutable construction phase: routes are
//! registered per HTTP method, optionally inside nested [`group`] frames that
//! stack pattern prefixes and middleware lists. [`RouteCollection::build`]
//! consumes the collection and produces an immutable [`RouteTable`], so
//! "mutate after freeze" cannot be written at all - ownership has moved.
//!
//! The table is `Arc`-backed: clone it once for the matcher and once for the
//! URL generator and share it across request threads without locking.
//!
//! [`group`]: RouteCollection::group
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use routecore::RouteCollection;
//! # use routecore::handler::{HandlerRequest, HandlerResponse, RequestHandler};
//! # struct H;
//! # impl RequestHandler for H {
//! #     fn handle(&self, _req: HandlerRequest) -> HandlerResponse { HandlerResponse::default() }
//! # }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut collection = RouteCollection::new();
//! collection.group("/api", Vec::new());
//! collection.group("/v1", Vec::new());
//! collection.get("/users", "user_list", Arc::new(H), Vec::new());
//! collection.end()?;
//! collection.end()?;
//!
//! let table = collection.build()?;
//! assert_eq!(table.get("user_list").unwrap().pattern(), "/api/v1/users");
//! # Ok(())
//! # }
//! ```

mod core;

pub use core::{RouteCollection, RouteCollectionError, RouteTable};
