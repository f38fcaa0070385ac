//! Handler trait and type erasure.
//!
//! Everything that can answer a request ends up as a [`BoxedHandler`]: plain
//! `async fn` route handlers, the router itself, each middleware layer, and
//! the `/v1` mount. That single shape is what lets middleware be a function
//! from handler to handler.
//!
//! ```text
//! async fn index_all(req: Request) -> Response { … }  ← route handler
//!        ↓ router.on(Method::Get, "/listings", index_all)
//! index_all.into_boxed_handler()                      ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(index_all))                      ← BoxedHandler
//!        ↓ middleware.wrap(handler)
//! Arc::new(AuthHandler { next, .. })                  ← still a BoxedHandler
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Dispatch interface shared by route handlers, middleware layers, the router,
/// and the mount.
///
/// Implement this directly when writing a [`Middleware`](crate::middleware::Middleware):
/// the wrapped layer holds the next [`BoxedHandler`] and decides whether to call it.
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Automatically satisfied for any `async fn` with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Bridges a concrete handler `F` to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
