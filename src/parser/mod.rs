//! HTTP request parsing.
//!
//! The host server uses this module to turn the bytes read from a connection
//! into an [`HttpRequest`] before handing it to the router.

mod request;
mod method;
mod version;
mod error;
mod tests;

pub use request::{HttpRequest, parse_request};
pub(crate) use request::{body_offset, declared_content_length};
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;
