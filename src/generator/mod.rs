//! # Generator Module
//!
//! Reverse routing: from a route name and parameter values back to a path or
//! absolute URL.
//!
//! ## Overview
//!
//! The generator walks the same token tree the matcher compiles from, so the
//! two directions share one grammar definition:
//!
//! - literals are appended verbatim
//! - placeholders are substituted with the supplied value, validated against
//!   the placeholder's constraint regex
//! - an optional group is rendered only when every placeholder directly
//!   inside it has a value; nested groups decide independently
//! - parameters not consumed by a placeholder become the query string, in the
//!   order they were supplied
//!
//! ## Example
//!
//! ```rust,ignore
//! use routecore::UrlGenerator;
//!
//! // route "user" registered as /user/{id:\d+}[/{name}]
//! let generator = UrlGenerator::new(table);
//! assert_eq!(generator.generate_path("user", &[("id", 1.into())], &[])?, "/user/1");
//! assert_eq!(
//!     generator.generate_path("user", &[("id", 1.into()), ("name", "sample".into())], &[])?,
//!     "/user/1/sample"
//! );
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::{ParamValue, UrlGenerator, UrlGeneratorError};
