//! # Pattern Module
//!
//! Grammar parser and compiler for route pattern strings.
//!
//! ## Grammar
//!
//! A pattern is literal text interspersed with placeholders and optional
//! groups:
//!
//! - `{name}` - placeholder matching any non-slash sequence (`[^/]+`)
//! - `{name:regex}` - placeholder with an explicit regex constraint
//! - `[...]` - optional group containing further literals, placeholders and
//!   nested optional groups
//!
//! Parsing is a single recursive-descent pass, O(pattern length), producing a
//! [`Token`] tree. The tree is the single source of truth for grammar
//! semantics: the matcher lowers it to an anchored regex and the URL
//! generator walks it in reverse, so the two directions cannot drift apart.
//!
//! ## Example
//!
//! ```
//! use routecore::pattern::{parse, Token};
//!
//! let tokens = parse("/users/{id:\\d+}[/posts]").unwrap();
//! assert_eq!(tokens.len(), 3);
//! assert!(matches!(tokens[0], Token::Literal(_)));
//! assert!(matches!(tokens[1], Token::Placeholder { .. }));
//! assert!(matches!(tokens[2], Token::Optional(_)));
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::{compile, parse, CompiledPattern, PatternError, Token, DEFAULT_CONSTRAINT};
