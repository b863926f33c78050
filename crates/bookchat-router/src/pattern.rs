//! Path templates with named segments (`/books/:bookId`).
//!
//! A pattern is split into static segments and `:name` parameter segments
//! and compiled into an anchored regex. Parameters bind exactly one
//! non-empty path component; a single trailing slash is tolerated.

use crate::error::{Result, RouterError};
use crate::params::ParamBindings;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text that must appear in the path
    Static(String),
    /// Named placeholder bound to the path component at this position
    Param(String),
}

/// Compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    regex: Regex,
    case_sensitive: bool,
}

impl PathPattern {
    /// Parse and compile a pattern.
    ///
    /// # Errors
    /// Returns `InvalidPattern` when the template doesn't start with `/`,
    /// contains an empty inner segment, an invalid parameter name or the
    /// same parameter twice.
    pub fn compile(raw: &str, case_sensitive: bool) -> Result<Self> {
        let invalid = |reason: String| RouterError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        if !raw.starts_with('/') {
            return Err(invalid("must start with '/'".to_string()));
        }

        let body = raw.strip_suffix('/').unwrap_or(raw);
        let mut segments = Vec::new();

        if !body.is_empty() {
            for piece in body[1..].split('/') {
                if piece.is_empty() {
                    return Err(invalid("empty segment".to_string()));
                }

                if let Some(name) = piece.strip_prefix(':') {
                    if !is_param_name(name) {
                        return Err(invalid(format!("invalid parameter name '{name}'")));
                    }
                    if segments.iter().any(|s| matches!(s, Segment::Param(p) if p == name)) {
                        return Err(invalid(format!("parameter '{name}' declared twice")));
                    }
                    segments.push(Segment::Param(name.to_string()));
                } else {
                    segments.push(Segment::Static(piece.to_string()));
                }
            }
        }

        let mut source = String::from("^");
        for segment in &segments {
            source.push('/');
            match segment {
                Segment::Static(text) => source.push_str(&regex::escape(text)),
                Segment::Param(name) => {
                    source.push_str("(?P<");
                    source.push_str(name);
                    source.push_str(">[^/]+)");
                }
            }
        }
        source.push_str("/?$");

        let regex = RegexBuilder::new(&source)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
            regex,
            case_sensitive,
        })
    }

    /// The template as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameters in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Whether this is the root pattern `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Match a concrete path (no base, no query, no hash).
    ///
    /// Bound values are percent-decoded; values that don't decode to UTF-8
    /// are kept as they appear in the path.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<ParamBindings> {
        let captures = self.regex.captures(path)?;

        Some(
            self.param_names()
                .filter_map(|name| {
                    captures.name(name).map(|m| {
                        let value = urlencoding::decode(m.as_str())
                            .map_or_else(|_| m.as_str().to_string(), Cow::into_owned);
                        (name.to_string(), value)
                    })
                })
                .collect(),
        )
    }

    /// Build a concrete path from bindings, percent-encoding each value.
    ///
    /// Returns the name of the first parameter that is missing or empty.
    pub fn build(&self, params: &ParamBindings) -> std::result::Result<String, String> {
        if self.is_root() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => {
                        path.push_str(&urlencoding::encode(value));
                    }
                    _ => return Err(name.clone()),
                },
            }
        }
        Ok(path)
    }

    /// Whether some concrete path could match both patterns.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.segments.len() != other.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(&other.segments)
            .all(|pair| match pair {
                (Segment::Static(a), Segment::Static(b)) => {
                    if self.case_sensitive && other.case_sensitive {
                        a == b
                    } else {
                        a.eq_ignore_ascii_case(b)
                    }
                }
                _ => true,
            })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn is_param_name(name: &str) -> bool {
    static PARAM_REGEX: OnceLock<Regex> = OnceLock::new();
    PARAM_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"))
        .is_match(name)
}
