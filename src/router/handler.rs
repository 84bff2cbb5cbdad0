//! The request-handling capability shared by routes, middleware and the
//! router's own entry point.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::server::{Error, HttpResponse};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Type alias for a handler function that takes an HttpRequest and returns a HandlerFuture.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// Wrap an async function or closure as a [`HandlerFn`].
///
/// ```
/// use microrouter::{handler, HttpResponse, StatusCode};
///
/// let hello = handler(|req| async move {
///     let name = req.param("name").unwrap_or("world").to_string();
///     Ok(HttpResponse::text(StatusCode::Ok, format!("Hello, {name}!")))
/// });
/// # let _ = hello;
/// ```
pub fn handler<F, Fut>(f: F) -> HandlerFn
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(move |req: HttpRequest| -> HandlerFuture { Box::pin(f(req)) })
}
