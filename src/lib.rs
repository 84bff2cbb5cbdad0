//! A minimal HTTP request router.
//!
//! Routes map a method and a path pattern to an async handler. Patterns are
//! `/`-separated segments; a segment written as `{name}` binds whatever the
//! request has in that position, and every other segment must match
//! verbatim. Middleware wraps the matched handler, and a configurable
//! not-found handler answers everything else.
//!
//! # Features
//!
//! - Registration per method (GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD)
//! - Named path parameters, available to handlers through [`HttpRequest::param`]
//! - Middleware chains with onion ordering: the last middleware added runs first
//! - Replaceable not-found handler and optional `405 Method Not Allowed` answers
//! - A small HTTP/1.x request parser and a tokio server to host the router
//!
//! # Examples
//!
//! ```no_run
//! use microrouter::{middleware, HttpResponse, HttpServer, Router, ServerConfig, StatusCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), microrouter::ServerError> {
//!     let mut router = Router::new();
//!     router
//!         .middleware(middleware::logger())
//!         .get("/people/{id}", |req| async move {
//!             let id = req.param("id").unwrap_or_default().to_string();
//!             Ok(HttpResponse::text(StatusCode::Ok, format!("person {id}")))
//!         })
//!         .not_found(|_req| async {
//!             Ok(HttpResponse::text(StatusCode::NotFound, "Custom 404: Page not found"))
//!         });
//!
//!     let server = HttpServer::new(ServerConfig::from_env(), router.into_handler());
//!     server.start().await
//! }
//! ```
//!
//! ## Matching a request without a server
//!
//! ```
//! use std::collections::HashMap;
//! use microrouter::{HttpRequest, HttpVersion, Method, Router};
//! use microrouter::router::Lookup;
//!
//! let mut router = Router::new();
//! router.get("/people/{id}", |_req| async {
//!     Ok(microrouter::HttpResponse::new(microrouter::StatusCode::Ok))
//! });
//!
//! match router.table().lookup(Method::GET, "/people/42") {
//!     Lookup::Found { params, .. } => assert_eq!(params.get("id"), Some("42")),
//!     _ => panic!("expected a match"),
//! }
//! # let _ = HttpRequest::new(Method::GET, "/", HttpVersion::Http11, HashMap::new());
//! ```
//!
//! See `demos/people_api.rs` for a complete CRUD service.

pub mod parser;
pub mod router;
pub mod server;

pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use router::{handler, middleware, HandlerFn, Middleware, Params, RouteError, Router};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
