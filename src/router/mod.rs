//! Request routing.
//!
//! A [`Router`] holds a [`RouteTable`] of patterns such as `/people/{id}`, a
//! chain of [`Middleware`] and a not-found handler. Each request is matched
//! against the patterns in registration order; the first pattern with the
//! same number of segments, equal literal segments and a handler for the
//! request's method wins. Parameter segments are bound into
//! [`HttpRequest::params`](crate::HttpRequest::params) before the
//! middleware-wrapped handler runs.

mod dispatcher;
mod error;
mod handler;
pub mod middleware;
mod params;
mod pattern;
mod table;

pub use dispatcher::{Router, NOT_FOUND_BODY};
pub use error::RouteError;
pub use handler::{handler, HandlerFn, HandlerFuture};
pub use middleware::Middleware;
pub use params::Params;
pub use pattern::{Pattern, Segment};
pub use table::{Lookup, RouteTable};
