//! Error types for handlers and the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors a handler may return, and errors raised while serving a connection.
///
/// The router never produces these itself; a request that matches no route
/// is answered by the not-found handler.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The request outgrew the configured size limit.
    #[error("Request exceeds {0} bytes")]
    RequestTooLarge(usize),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
