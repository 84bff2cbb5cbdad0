//! Route patterns and the segment matcher.
//!
//! A pattern such as `/people/{id}` is split on `/` into literal segments and
//! parameter segments. A path matches when it has exactly as many segments and
//! every literal segment is equal; parameter segments accept any value,
//! including an empty one. There is no trailing-slash normalization, so
//! `/people/` does not match `/people`.

use std::collections::HashSet;

use crate::router::error::RouteError;
use crate::router::params::Params;

const SEPARATOR: char = '/';
const PARAM_OPEN: char = '{';
const PARAM_CLOSE: char = '}';

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly (case-sensitive).
    Literal(String),
    /// Binds the path segment to this name.
    Param(String),
}

impl Segment {
    fn classify(raw: &str) -> Self {
        let is_param = raw.len() >= 2 && raw.starts_with(PARAM_OPEN) && raw.ends_with(PARAM_CLOSE);
        if is_param {
            Segment::Param(raw[1..raw.len() - 1].to_string())
        } else {
            Segment::Literal(raw.to_string())
        }
    }
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Split `source` into segments. Never fails: anything that is not a whole
    /// `{name}` segment is kept as a literal.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = source.split(SEPARATOR).map(Segment::classify).collect();
        Self { source, segments }
    }

    /// The pattern exactly as it was registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameter segments, in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match `path` against this pattern, returning the bound parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut parts = path.split(SEPARATOR);
        let mut params = Params::new();

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Param(name) => params.insert(name.as_str(), part),
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
            }
        }

        // The path has more segments than the pattern.
        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }

    /// Check the pattern for segments that look like parameters but are not
    /// bound as one.
    pub fn validate(&self) -> Result<(), RouteError> {
        let mut seen = HashSet::new();

        for segment in &self.segments {
            match segment {
                Segment::Param(name) if name.is_empty() => {
                    return Err(RouteError::EmptyParameter(self.source.clone()));
                }
                Segment::Param(name) if has_delimiter(name) => {
                    return Err(self.malformed(format!("{PARAM_OPEN}{name}{PARAM_CLOSE}")));
                }
                Segment::Param(name) => {
                    if !seen.insert(name.as_str()) {
                        return Err(RouteError::DuplicateParameter {
                            pattern: self.source.clone(),
                            name: name.clone(),
                        });
                    }
                }
                Segment::Literal(literal) if has_delimiter(literal) => {
                    return Err(self.malformed(literal.clone()));
                }
                Segment::Literal(_) => {}
            }
        }

        Ok(())
    }

    fn malformed(&self, segment: String) -> RouteError {
        RouteError::MalformedSegment {
            pattern: self.source.clone(),
            segment,
        }
    }
}

fn has_delimiter(s: &str) -> bool {
    s.contains([PARAM_OPEN, PARAM_CLOSE])
}
