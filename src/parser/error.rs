//! Error types for the HTTP request parser.

use thiserror::Error;

/// Errors that can occur while turning raw bytes into an [`HttpRequest`](crate::HttpRequest).
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP method in the request is not supported.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request target is not an origin-form path.
    #[error("Invalid HTTP path")]
    InvalidPath,

    /// The request line is malformed (wrong format or missing components).
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The HTTP version in the request is not supported.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// A required header is missing from the request.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// A header line has no `name: value` separator.
    #[error("Invalid header format")]
    InvalidHeaderFormat,

    #[error("Empty request")]
    EmptyRequest,

    /// The request body could not be decoded as JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
