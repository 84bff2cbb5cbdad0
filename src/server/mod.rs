//! HTTP server hosting a router.
//!
//! The server owns connection handling: it accepts TCP connections, parses
//! each request and passes it to a single entry-point handler, typically a
//! frozen [`Router`](crate::Router).

mod response;
mod config;
mod error;
mod http_server;

pub use response::{HttpResponse, StatusCode};
pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::Error;
pub use http_server::HttpServer;
