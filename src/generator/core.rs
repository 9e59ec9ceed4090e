use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::collection::RouteTable;
use crate::handler::Request;
use crate::pattern::{CompiledPattern, PatternError, Token, DEFAULT_CONSTRAINT};

/// A parameter value supplied to the generator: a string or an integer.
///
/// Integers are rendered in plain decimal, no locale formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

/// URL generation failure.
///
/// Recoverable for the caller, but almost always a configuration or
/// programming bug; fail loudly rather than emit a malformed URL.
#[derive(Debug, Clone)]
pub enum UrlGeneratorError {
    /// No route registered under this name.
    UnknownRoute { name: String },
    /// A required placeholder has no supplied value.
    MissingParameter { route: String, name: String },
    /// A supplied value does not satisfy its placeholder's constraint.
    InvalidParameterValue {
        name: String,
        value: String,
        constraint: String,
    },
    /// The route's pattern failed to compile on first use.
    Pattern(PatternError),
}

impl fmt::Display for UrlGeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlGeneratorError::UnknownRoute { name } => {
                write!(f, "Missing route: \"{name}\"")
            }
            UrlGeneratorError::MissingParameter { route, name } => {
                write!(f, "Missing parameter \"{name}\" while path generation for route: \"{route}\"")
            }
            UrlGeneratorError::InvalidParameterValue {
                name,
                value,
                constraint,
            } => {
                write!(f, "Parameter \"{name}\" with value \"{value}\" does not match \"{constraint}\"")
            }
            UrlGeneratorError::Pattern(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for UrlGeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UrlGeneratorError::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatternError> for UrlGeneratorError {
    fn from(err: PatternError) -> Self {
        UrlGeneratorError::Pattern(err)
    }
}

/// Generates paths and absolute URLs from named routes.
///
/// Shares the frozen [`RouteTable`] with the matcher; compiled patterns are
/// cached per route, so repeated generation for the same route parses
/// nothing.
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    table: RouteTable,
}

impl UrlGenerator {
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// Generate the path-and-query form for a named route.
    ///
    /// `params` supplies placeholder values; entries not consumed by a
    /// placeholder are serialized as a query string in their supplied order,
    /// followed by `extra_query` pairs.
    ///
    /// # Errors
    ///
    /// [`UrlGeneratorError::UnknownRoute`] for an unregistered name,
    /// [`UrlGeneratorError::MissingParameter`] when a required placeholder
    /// has no value, [`UrlGeneratorError::InvalidParameterValue`] when a
    /// value fails its constraint.
    pub fn generate_path(
        &self,
        name: &str,
        params: &[(&str, ParamValue)],
        extra_query: &[(&str, ParamValue)],
    ) -> Result<String, UrlGeneratorError> {
        let route = self
            .table
            .get(name)
            .ok_or_else(|| UrlGeneratorError::UnknownRoute {
                name: name.to_string(),
            })?;
        let compiled = route.compiled()?;

        let mut path = String::with_capacity(route.pattern().len());
        let mut consumed: HashSet<&str> = HashSet::new();
        render_tokens(compiled.tokens(), compiled, name, params, &mut consumed, &mut path)?;

        let mut query = String::new();
        for (key, value) in params {
            if !consumed.contains(key) {
                push_query_pair(&mut query, key, &value.to_string());
            }
        }
        for (key, value) in extra_query {
            push_query_pair(&mut query, key, &value.to_string());
        }
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }

        debug!(route = %name, path = %path, "path generated");

        Ok(path)
    }

    /// Generate a fully-qualified URL, taking scheme and authority from the
    /// current request's URI.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`generate_path`](Self::generate_path).
    pub fn generate_url<R: Request>(
        &self,
        request: &R,
        name: &str,
        params: &[(&str, ParamValue)],
        extra_query: &[(&str, ParamValue)],
    ) -> Result<String, UrlGeneratorError> {
        let path = self.generate_path(name, params, extra_query)?;
        Ok(format!(
            "{}://{}{}",
            request.scheme(),
            request.authority(),
            path
        ))
    }
}

fn lookup<'p>(params: &'p [(&str, ParamValue)], name: &str) -> Option<&'p ParamValue> {
    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// True when every placeholder *directly* inside `tokens` has a supplied
/// value. Placeholders inside nested optional groups do not count; those
/// groups decide for themselves.
fn renders(tokens: &[Token], params: &[(&str, ParamValue)]) -> bool {
    tokens.iter().all(|token| match token {
        Token::Placeholder { name, .. } => lookup(params, name).is_some(),
        _ => true,
    })
}

fn render_tokens<'t>(
    tokens: &'t [Token],
    compiled: &CompiledPattern,
    route_name: &str,
    params: &[(&str, ParamValue)],
    consumed: &mut HashSet<&'t str>,
    out: &mut String,
) -> Result<(), UrlGeneratorError> {
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Placeholder { name, constraint } => {
                let Some(value) = lookup(params, name) else {
                    return Err(UrlGeneratorError::MissingParameter {
                        route: route_name.to_string(),
                        name: name.clone(),
                    });
                };
                let text = value.to_string();
                if let Some(regex) = compiled.constraint(name) {
                    if !regex.is_match(&text) {
                        return Err(UrlGeneratorError::InvalidParameterValue {
                            name: name.clone(),
                            value: text,
                            constraint: constraint
                                .clone()
                                .unwrap_or_else(|| DEFAULT_CONSTRAINT.to_string()),
                        });
                    }
                }
                out.push_str(&text);
                consumed.insert(name.as_str());
            }
            Token::Optional(inner) => {
                if renders(inner, params) {
                    render_tokens(inner, compiled, route_name, params, consumed, out)?;
                }
            }
        }
    }
    Ok(())
}

fn push_query_pair(query: &mut String, key: &str, value: &str) {
    if !query.is_empty() {
        query.push('&');
    }
    query.push_str(&urlencoding::encode(key));
    query.push('=');
    query.push_str(&urlencoding::encode(value));
}
