use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Constraint applied to a placeholder that does not declare one: any
/// non-empty sequence of non-slash characters.
pub const DEFAULT_CONSTRAINT: &str = "[^/]+";

/// One node of a parsed route pattern.
///
/// The token tree is shared by the matcher (which lowers it to an anchored
/// regex) and the URL generator (which walks it in reverse), so grammar
/// semantics are defined exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal path text, appended/matched verbatim.
    Literal(String),
    /// Named variable segment, e.g. `{id}` or `{id:\d+}`.
    ///
    /// `constraint` is `None` when the placeholder relies on
    /// [`DEFAULT_CONSTRAINT`].
    Placeholder {
        name: String,
        constraint: Option<String>,
    },
    /// Optional sub-pattern `[...]`; matched/rendered only when its contents
    /// allow it. Optional groups nest.
    Optional(Vec<Token>),
}

/// Pattern parse or compile failure.
///
/// These are construction-time errors: they surface when a route table is
/// compiled at startup and are never produced during request handling.
#[derive(Debug, Clone)]
pub enum PatternError {
    /// `[` and `]` do not pair up.
    UnbalancedOptional { pattern: String },
    /// An optional group with no content (`[]`).
    EmptyOptional { pattern: String },
    /// A `{...}` placeholder with a bad name or missing closing brace.
    MalformedPlaceholder { pattern: String, offset: usize },
    /// The same placeholder name appears twice within one pattern.
    DuplicatePlaceholder { pattern: String, name: String },
    /// A placeholder constraint is not a valid regex.
    InvalidConstraint {
        name: String,
        constraint: String,
        source: regex::Error,
    },
    /// The assembled path regex failed to compile.
    Compile {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::UnbalancedOptional { pattern } => {
                write!(f, "unbalanced optional segment brackets in pattern \"{pattern}\"")
            }
            PatternError::EmptyOptional { pattern } => {
                write!(f, "empty optional segment in pattern \"{pattern}\"")
            }
            PatternError::MalformedPlaceholder { pattern, offset } => {
                write!(f, "malformed placeholder at offset {offset} in pattern \"{pattern}\"")
            }
            PatternError::DuplicatePlaceholder { pattern, name } => {
                write!(f, "duplicate placeholder \"{name}\" in pattern \"{pattern}\"")
            }
            PatternError::InvalidConstraint {
                name,
                constraint,
                source,
            } => {
                write!(
                    f,
                    "invalid constraint \"{constraint}\" for placeholder \"{name}\": {source}"
                )
            }
            PatternError::Compile { pattern, source } => {
                write!(f, "failed to compile pattern \"{pattern}\": {source}")
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::InvalidConstraint { source, .. }
            | PatternError::Compile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parse a route pattern into its token tree.
///
/// Single pass, O(pattern length). Deterministic: parsing the same string
/// twice yields structurally equal token sequences.
///
/// # Errors
///
/// Returns [`PatternError`] on unbalanced `[`/`]`, empty optional groups,
/// malformed placeholder syntax, or a placeholder name used twice.
pub fn parse(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let mut pos = 0usize;
    let tokens = parse_sequence(pattern, &mut pos, 0)?;
    let mut seen = HashSet::new();
    check_unique_placeholders(pattern, &tokens, &mut seen)?;
    Ok(tokens)
}

fn parse_sequence(pattern: &str, pos: &mut usize, depth: usize) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();

    while let Some(c) = pattern[*pos..].chars().next() {
        match c {
            '[' => {
                flush_literal(&mut tokens, &mut literal);
                *pos += 1;
                let inner = parse_sequence(pattern, pos, depth + 1)?;
                if !pattern[*pos..].starts_with(']') {
                    return Err(PatternError::UnbalancedOptional {
                        pattern: pattern.to_string(),
                    });
                }
                *pos += 1;
                if inner.is_empty() {
                    return Err(PatternError::EmptyOptional {
                        pattern: pattern.to_string(),
                    });
                }
                tokens.push(Token::Optional(inner));
            }
            ']' => {
                if depth == 0 {
                    return Err(PatternError::UnbalancedOptional {
                        pattern: pattern.to_string(),
                    });
                }
                // The enclosing group consumes the bracket.
                break;
            }
            '{' => {
                flush_literal(&mut tokens, &mut literal);
                tokens.push(parse_placeholder(pattern, pos)?);
            }
            _ => {
                literal.push(c);
                *pos += c.len_utf8();
            }
        }
    }

    flush_literal(&mut tokens, &mut literal);
    Ok(tokens)
}

fn flush_literal(tokens: &mut Vec<Token>, literal: &mut String) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

/// Parse one `{name}` / `{name:regex}` placeholder starting at the `{`.
///
/// Constraint text may contain balanced braces of its own (e.g. `\d{4}`), so
/// the closing brace is found by depth counting, not by the first `}`.
fn parse_placeholder(pattern: &str, pos: &mut usize) -> Result<Token, PatternError> {
    let start = *pos;
    *pos += 1; // consume '{'

    let rest = &pattern[*pos..];
    let name_len = placeholder_name_len(rest);
    if name_len == 0 {
        return Err(PatternError::MalformedPlaceholder {
            pattern: pattern.to_string(),
            offset: start,
        });
    }
    let name = rest[..name_len].to_string();
    *pos += name_len;

    match pattern[*pos..].chars().next() {
        Some('}') => {
            *pos += 1;
            Ok(Token::Placeholder {
                name,
                constraint: None,
            })
        }
        Some(':') => {
            *pos += 1;
            let constraint_start = *pos;
            let mut brace_depth = 1usize;
            for (i, c) in pattern[constraint_start..].char_indices() {
                match c {
                    '{' => brace_depth += 1,
                    '}' => {
                        brace_depth -= 1;
                        if brace_depth == 0 {
                            if i == 0 {
                                // `{name:}` carries no constraint text.
                                return Err(PatternError::MalformedPlaceholder {
                                    pattern: pattern.to_string(),
                                    offset: start,
                                });
                            }
                            let constraint = pattern[constraint_start..constraint_start + i].to_string();
                            *pos = constraint_start + i + 1;
                            return Ok(Token::Placeholder {
                                name,
                                constraint: Some(constraint),
                            });
                        }
                    }
                    _ => {}
                }
            }
            Err(PatternError::MalformedPlaceholder {
                pattern: pattern.to_string(),
                offset: start,
            })
        }
        _ => Err(PatternError::MalformedPlaceholder {
            pattern: pattern.to_string(),
            offset: start,
        }),
    }
}

/// Length in bytes of a leading `[A-Za-z_][A-Za-z0-9_]*` identifier.
fn placeholder_name_len(s: &str) -> usize {
    let mut len = 0usize;
    for (i, c) in s.char_indices() {
        let valid = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !valid {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}

fn check_unique_placeholders(
    pattern: &str,
    tokens: &[Token],
    seen: &mut HashSet<String>,
) -> Result<(), PatternError> {
    for token in tokens {
        match token {
            Token::Literal(_) => {}
            Token::Placeholder { name, .. } => {
                if !seen.insert(name.clone()) {
                    return Err(PatternError::DuplicatePlaceholder {
                        pattern: pattern.to_string(),
                        name: name.clone(),
                    });
                }
            }
            Token::Optional(inner) => check_unique_placeholders(pattern, inner, seen)?,
        }
    }
    Ok(())
}

/// A route pattern lowered into matchable and renderable form.
///
/// Holds the token tree, the anchored whole-path regex with one named capture
/// group per placeholder, the placeholder names in declaration order, and an
/// anchored constraint regex per placeholder for generation-time validation.
///
/// Built once per route and cached; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    tokens: Vec<Token>,
    regex: Regex,
    placeholders: Vec<String>,
    constraints: HashMap<String, Regex>,
}

impl CompiledPattern {
    /// The parsed token tree.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Anchored regex matching the full decoded request path.
    ///
    /// Each placeholder is a named capture group; a group inside an optional
    /// segment captures nothing when the segment is absent. Optional segments
    /// are greedy, so the longest satisfiable form wins.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Placeholder names in declaration order.
    #[must_use]
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Anchored constraint regex for one placeholder.
    #[must_use]
    pub fn constraint(&self, name: &str) -> Option<&Regex> {
        self.constraints.get(name)
    }
}

/// Parse and lower a pattern in one step.
///
/// # Errors
///
/// All [`parse`] errors, plus [`PatternError::InvalidConstraint`] when a
/// placeholder constraint is not a valid regex and
/// [`PatternError::Compile`] when the assembled path regex fails to build.
pub fn compile(pattern: &str) -> Result<CompiledPattern, PatternError> {
    let tokens = parse(pattern)?;

    let mut placeholders = Vec::new();
    let mut constraints = HashMap::new();
    compile_constraints(&tokens, &mut placeholders, &mut constraints)?;

    let mut source = String::with_capacity(pattern.len() + 16);
    source.push('^');
    lower_tokens(&tokens, &mut source);
    source.push('$');

    let regex = Regex::new(&source).map_err(|source| PatternError::Compile {
        pattern: pattern.to_string(),
        source,
    })?;

    Ok(CompiledPattern {
        tokens,
        regex,
        placeholders,
        constraints,
    })
}

/// Validate each constraint on its own so failures name the placeholder.
fn compile_constraints(
    tokens: &[Token],
    placeholders: &mut Vec<String>,
    constraints: &mut HashMap<String, Regex>,
) -> Result<(), PatternError> {
    for token in tokens {
        match token {
            Token::Literal(_) => {}
            Token::Placeholder { name, constraint } => {
                let raw = constraint.as_deref().unwrap_or(DEFAULT_CONSTRAINT);
                let anchored = format!("^(?:{raw})$");
                let compiled =
                    Regex::new(&anchored).map_err(|source| PatternError::InvalidConstraint {
                        name: name.clone(),
                        constraint: raw.to_string(),
                        source,
                    })?;
                placeholders.push(name.clone());
                constraints.insert(name.clone(), compiled);
            }
            Token::Optional(inner) => compile_constraints(inner, placeholders, constraints)?,
        }
    }
    Ok(())
}

fn lower_tokens(tokens: &[Token], out: &mut String) {
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(&regex::escape(text)),
            Token::Placeholder { name, constraint } => {
                out.push_str("(?P<");
                out.push_str(name);
                out.push('>');
                out.push_str(constraint.as_deref().unwrap_or(DEFAULT_CONSTRAINT));
                out.push(')');
            }
            Token::Optional(inner) => {
                out.push_str("(?:");
                lower_tokens(inner, out);
                out.push_str(")?");
            }
        }
    }
}
