//! The router: registration surface and request dispatch.

use std::future::Future;
use std::sync::Arc;
use log::{debug, info, warn};

use crate::parser::{HttpRequest, Method};
use crate::router::error::RouteError;
use crate::router::handler::{handler, HandlerFn, HandlerFuture};
use crate::router::middleware::{self, Middleware};
use crate::router::pattern::Pattern;
use crate::router::table::{Lookup, RouteTable};
use crate::server::{Error, HttpResponse, StatusCode};

/// Body of the default not-found response.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Maps method + path to a handler and runs middleware around it.
///
/// Configure a router with `&mut self` methods, then freeze it with
/// [`Router::into_handler`] to get the single entry point a server calls for
/// every request.
///
/// ```
/// use microrouter::{HttpResponse, Router, StatusCode};
///
/// let mut router = Router::new();
/// router.get("/people/{id}", |req| async move {
///     let id = req.param("id").unwrap_or_default().to_string();
///     Ok(HttpResponse::text(StatusCode::Ok, id))
/// });
/// let entry = router.into_handler();
/// # let _ = entry;
/// ```
#[derive(Clone)]
pub struct Router {
    table: RouteTable,
    middleware: Vec<Middleware>,
    not_found: HandlerFn,
    method_not_allowed: bool,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a router with no routes, no middleware and the default
    /// `404 page not found` handler.
    pub fn new() -> Self {
        Self {
            table: RouteTable::new(),
            middleware: Vec::new(),
            not_found: handler(|_req| async { Ok(not_found_response()) }),
            method_not_allowed: false,
        }
    }

    /// Register `handler` for `method` on `pattern`.
    ///
    /// The pattern is not rejected when malformed; a segment such as
    /// `prefix-{id}` is matched literally. Registering the same method and
    /// pattern again replaces the earlier handler.
    pub fn route(&mut self, method: Method, pattern: &str, handler: HandlerFn) -> &mut Self {
        if let Err(e) = Pattern::parse(pattern).validate() {
            warn!("Registering {method} {pattern} as-is: {e}");
        }
        self.table.register(method, pattern, handler);
        self
    }

    /// Like [`Router::route`], but rejects malformed patterns instead of
    /// registering them.
    pub fn try_route(&mut self, method: Method, pattern: &str, handler: HandlerFn) -> Result<&mut Self, RouteError> {
        Pattern::parse(pattern).validate()?;
        self.table.register(method, pattern, handler);
        Ok(self)
    }

    /// Register a GET handler.
    pub fn get<F, Fut>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::GET, pattern, handler(f))
    }

    /// Register a POST handler.
    pub fn post<F, Fut>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::POST, pattern, handler(f))
    }

    /// Register a PUT handler.
    pub fn put<F, Fut>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::PUT, pattern, handler(f))
    }

    /// Register a DELETE handler.
    pub fn delete<F, Fut>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::DELETE, pattern, handler(f))
    }

    /// Register a PATCH handler.
    pub fn patch<F, Fut>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::PATCH, pattern, handler(f))
    }

    /// Register an OPTIONS handler.
    pub fn options<F, Fut>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::OPTIONS, pattern, handler(f))
    }

    /// Register a HEAD handler.
    pub fn head<F, Fut>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::HEAD, pattern, handler(f))
    }

    /// Append a middleware to the chain. The most recently added middleware
    /// is the outermost one.
    pub fn middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.middleware.push(middleware);
        self
    }

    /// Replace the handler used when no route matches.
    pub fn not_found<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.not_found = handler(f);
        self
    }

    /// Answer `405 Method Not Allowed` when a path matches a pattern that has
    /// no handler for the request's method. Off by default, in which case
    /// such requests get the not-found handler.
    pub fn handle_method_not_allowed(&mut self, enabled: bool) -> &mut Self {
        self.method_not_allowed = enabled;
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Route one request.
    ///
    /// Matching and middleware wrapping happen before this returns; the
    /// returned future runs the handler chain. Handler errors are passed
    /// through untouched.
    pub fn dispatch(&self, mut request: HttpRequest) -> HandlerFuture {
        match self.table.lookup(request.method, &request.path) {
            Lookup::Found { handler, params } => {
                debug!("{method} {path} matched with {count} params",
                    method = request.method, path = request.path, count = params.len());
                request.params = params;
                let wrapped = middleware::wrap(&self.middleware, handler);
                wrapped(request)
            }
            Lookup::MethodNotAllowed { allowed } if self.method_not_allowed => {
                debug!("{method} {path} not allowed", method = request.method, path = request.path);
                let response = method_not_allowed_response(&request, &allowed);
                Box::pin(async move { Ok(response) })
            }
            Lookup::MethodNotAllowed { .. } | Lookup::NotFound => {
                debug!("{method} {path} not found", method = request.method, path = request.path);
                (self.not_found)(request)
            }
        }
    }

    /// Freeze the router into the entry-point handler a server calls once per
    /// request.
    pub fn into_handler(self) -> HandlerFn {
        info!("Registered endpoints:");
        for (method, pattern) in self.table.routes() {
            info!("  {method} {pattern}");
        }

        let router = Arc::new(self);
        Arc::new(move |req: HttpRequest| router.dispatch(req))
    }
}

fn not_found_response() -> HttpResponse {
    HttpResponse::text(StatusCode::NotFound, NOT_FOUND_BODY)
        .with_header("X-Content-Type-Options", "nosniff")
}

fn method_not_allowed_response(request: &HttpRequest, allowed: &[Method]) -> HttpResponse {
    let allowed = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<&str>>()
        .join(", ");

    HttpResponse::text(
        StatusCode::MethodNotAllowed,
        format!(
            "Method {method} not allowed for path: {path}. Allowed methods: {allowed}",
            method = request.method,
            path = request.path,
        ),
    )
    .with_header("Allow", allowed)
}
