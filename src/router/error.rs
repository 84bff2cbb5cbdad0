//! Error types for route registration.

use thiserror::Error;

/// Reasons a pattern is rejected by [`Router::try_route`](crate::Router::try_route).
///
/// The infallible registration methods accept all of these and treat the
/// offending segment as a literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A `{}` segment with no parameter name.
    #[error("Empty parameter name in pattern: {0}")]
    EmptyParameter(String),

    /// A segment that uses `{` or `}` without being a whole `{name}` segment.
    #[error("Malformed segment '{segment}' in pattern: {pattern}")]
    MalformedSegment { pattern: String, segment: String },

    /// The same parameter name bound twice in one pattern.
    #[error("Parameter '{name}' appears more than once in pattern: {pattern}")]
    DuplicateParameter { pattern: String, name: String },
}
