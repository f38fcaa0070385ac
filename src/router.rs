//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. A router is itself a
//! handler, so it can sit at the bottom of a middleware chain.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup, then hand it to a [`Chain`](crate::middleware::Chain)
/// via [`Router::into_handler`]. Each [`Router::on`] call returns `self` so
/// registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

/// Outcome of matching one request against the routing table.
pub(crate) enum Route {
    Found(BoxedHandler, HashMap<String, String>),
    /// The path exists, but not for this method. Carries the allowed methods, sorted.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use votegate::{Method, Request, Response, Router};
    /// # async fn show(_: Request) -> Response { Response::text("") }
    /// # async fn create(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/listing/{id}", show)
    ///     .on(Method::Post, "/listing",      create);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the pattern is malformed or the same (method, pattern) pair
    /// is registered twice. Routes are fixed at startup, so either is a bug.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method.clone())
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Erases the router into a handler that answers unmatched requests with
    /// `404` or `405`.
    pub fn into_handler(self) -> BoxedHandler {
        Arc::new(self)
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Route {
        if let Some(found) = self.find(method, path) {
            return found;
        }
        // GET routes answer HEAD too.
        if *method == Method::Head {
            if let Some(found) = self.find(&Method::Get, path) {
                return found;
            }
        }

        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| m.clone())
            .collect();
        if allowed.is_empty() {
            return Route::NotFound;
        }
        if allowed.contains(&Method::Get) && !allowed.contains(&Method::Head) {
            allowed.push(Method::Head);
        }
        allowed.sort();
        Route::MethodNotAllowed(allowed)
    }

    fn find(&self, method: &Method, path: &str) -> Option<Route> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some(Route::Found(handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl ErasedHandler for Router {
    fn call(&self, mut req: Request) -> BoxFuture {
        match self.lookup(req.method(), req.path()) {
            Route::Found(handler, params) => {
                req.params = params;
                handler.call(req)
            }
            Route::MethodNotAllowed(allowed) => {
                let allow = allowed.iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                let res = Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .text(Status::MethodNotAllowed.reason());
                Box::pin(async move { res })
            }
            Route::NotFound => Box::pin(async {
                Response::builder()
                    .status(Status::NotFound)
                    .text(Status::NotFound.reason())
            }),
        }
    }
}
