//! Middleware: functions that wrap one handler in another.
//!
//! The router folds its middleware around the matched handler on every
//! dispatch. Middleware registered first ends up innermost, closest to the
//! handler; middleware registered last ends up outermost and is the first to
//! see the request and the last to see the response.

use std::future::Future;
use std::sync::Arc;
use log::info;

use crate::parser::HttpRequest;
use crate::router::handler::{HandlerFn, HandlerFuture};
use crate::server::{Error, HttpResponse};

/// A handler transformer: receives the next handler and returns the wrapped one.
pub type Middleware = Arc<dyn Fn(HandlerFn) -> HandlerFn + Send + Sync>;

/// Build a middleware from an async function that receives the request and
/// the next handler in the chain.
///
/// ```
/// use microrouter::middleware;
///
/// let timing = middleware::from_fn(|req, next| async move {
///     let started = std::time::Instant::now();
///     let response = next(req).await;
///     log::debug!("handled in {:?}", started.elapsed());
///     response
/// });
/// # let _ = timing;
/// ```
pub fn from_fn<F, Fut>(f: F) -> Middleware
where
    F: Fn(HttpRequest, HandlerFn) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    let f = Arc::new(f);
    Arc::new(move |next: HandlerFn| -> HandlerFn {
        let f = Arc::clone(&f);
        Arc::new(move |req: HttpRequest| -> HandlerFuture { Box::pin(f(req, Arc::clone(&next))) })
    })
}

/// Logs the method and path of every routed request at info level.
pub fn logger() -> Middleware {
    from_fn(|req: HttpRequest, next: HandlerFn| async move {
        info!("{method} {path}", method = req.method, path = req.path);
        next(req).await
    })
}

/// Fold `chain` around `handler`, each middleware wrapping the result of the
/// ones registered before it.
pub(crate) fn wrap(chain: &[Middleware], handler: HandlerFn) -> HandlerFn {
    chain.iter().fold(handler, |inner, middleware| middleware(inner))
}
