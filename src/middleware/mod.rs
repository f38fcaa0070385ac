//! Middleware layer.
//!
//! A middleware turns one handler into another: it receives the next
//! [`BoxedHandler`] and returns a handler that wraps it. That is the whole
//! contract, so middleware compose by plain function application.
//!
//! [`Chain`] applies a list of middleware so the **first** one registered is
//! the **outermost**: it runs first on the way in and last on the way out.
//!
//! ```rust
//! use std::sync::Arc;
//! use votegate::{Method, Request, Response, Router};
//! use votegate::log::TracingLog;
//! use votegate::middleware::{Authenticate, Chain, Logging};
//!
//! async fn index_all(_req: Request) -> Response { Response::text("Index all\n") }
//!
//! let log = Arc::new(TracingLog);
//! let v1 = Chain::new()
//!     .with(Logging::new(log.clone()))
//!     .with(Authenticate::new(log))
//!     .apply(Router::new().on(Method::Get, "/listings", index_all).into_handler());
//! ```

pub mod auth;
pub mod logging;

use std::sync::Arc;

use crate::handler::BoxedHandler;

pub use auth::{AuthError, Authenticate, UserId};
pub use logging::Logging;

/// A handler transformer.
///
/// `wrap` is called once, when the chain is built. Per-request work belongs
/// in the returned handler.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

/// An ordered list of middleware.
#[derive(Clone, Default)]
pub struct Chain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl Chain {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a layer. Earlier layers wrap later ones.
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    /// Wrap `handler` in every layer, right to left. An empty chain returns
    /// `handler` unchanged.
    pub fn apply(&self, handler: BoxedHandler) -> BoxedHandler {
        self.layers.iter().rev().fold(handler, |next, layer| layer.wrap(next))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::handler::{BoxFuture, ErasedHandler, Handler};
    use crate::request::Request;
    use crate::response::Response;

    type Trace = Arc<Mutex<Vec<String>>>;

    /// Records `>name` on the way in and `<name` on the way out.
    struct Mark {
        name: &'static str,
        trace: Trace,
    }

    struct MarkHandler {
        name: &'static str,
        trace: Trace,
        next: BoxedHandler,
    }

    impl Middleware for Mark {
        fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
            self.trace.lock().unwrap().push(format!("wrap {}", self.name));
            Arc::new(MarkHandler { name: self.name, trace: self.trace.clone(), next })
        }
    }

    impl ErasedHandler for MarkHandler {
        fn call(&self, req: Request) -> BoxFuture {
            let (name, trace, next) = (self.name, self.trace.clone(), self.next.clone());
            Box::pin(async move {
                trace.lock().unwrap().push(format!(">{name}"));
                let res = next.call(req).await;
                trace.lock().unwrap().push(format!("<{name}"));
                res
            })
        }
    }

    async fn terminal(_req: Request) -> Response {
        Response::text("done")
    }

    fn chain(trace: &Trace) -> Chain {
        Chain::new()
            .with(Mark { name: "a", trace: trace.clone() })
            .with(Mark { name: "b", trace: trace.clone() })
            .with(Mark { name: "c", trace: trace.clone() })
    }

    #[tokio::test]
    async fn first_layer_is_outermost() {
        let trace = Trace::default();
        let handler = chain(&trace).apply(terminal.into_boxed_handler());
        trace.lock().unwrap().clear();

        handler.call(Request::get("/")).await;
        assert_eq!(*trace.lock().unwrap(), [">a", ">b", ">c", "<c", "<b", "<a"]);
    }

    #[tokio::test]
    async fn building_runs_no_request_logic() {
        let trace = Trace::default();
        let _handler = chain(&trace).apply(terminal.into_boxed_handler());
        assert_eq!(*trace.lock().unwrap(), ["wrap c", "wrap b", "wrap a"]);
    }

    #[tokio::test]
    async fn empty_chain_is_identity() {
        let handler = terminal.into_boxed_handler();
        let applied = Chain::new().apply(handler.clone());
        assert!(Arc::ptr_eq(&handler, &applied));
        assert_eq!(applied.call(Request::get("/")).await.body(), b"done");
    }

    #[tokio::test]
    async fn same_chain_composes_deterministically() {
        let trace = Trace::default();
        let chain = chain(&trace);
        let first = chain.apply(terminal.into_boxed_handler());
        let second = chain.apply(terminal.into_boxed_handler());
        trace.lock().unwrap().clear();

        first.call(Request::get("/")).await;
        let once = std::mem::take(&mut *trace.lock().unwrap());
        second.call(Request::get("/")).await;
        assert_eq!(once, *trace.lock().unwrap());
    }
}
