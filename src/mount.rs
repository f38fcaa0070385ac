//! Prefix mounting.
//!
//! A [`Mount`] owns the top of the URL space and forwards `/<prefix>/...`
//! to the handler registered for that prefix, with the prefix removed.
//! Inner routers therefore register prefix-free patterns (`/listings`, not
//! `/v1/listings`).

use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Dispatches on a fixed path prefix. Requests outside every prefix get
/// `404` here and never reach the mounted handlers or their middleware.
pub struct Mount {
    mounts: Vec<(String, BoxedHandler)>,
}

impl Mount {
    pub fn new() -> Self {
        Self { mounts: Vec::new() }
    }

    /// Serve `handler` for every path under `prefix/`.
    ///
    /// `prefix` has no trailing slash (`"/v1"`). It is matched case-sensitively
    /// and stripped exactly once, so `/v1/listings` reaches `handler` as
    /// `/listings`. The bare prefix (`/v1`) is not mounted.
    ///
    /// # Panics
    ///
    /// Panics if `prefix` does not start with `/` or ends with one.
    pub fn nest(mut self, prefix: &str, handler: BoxedHandler) -> Self {
        assert!(
            prefix.starts_with('/') && !prefix.ends_with('/'),
            "invalid mount prefix `{prefix}`",
        );
        self.mounts.push((prefix.to_owned(), handler));
        self
    }

    pub fn into_handler(self) -> BoxedHandler {
        Arc::new(self)
    }

    fn resolve<'a>(&self, path: &'a str) -> Option<(&BoxedHandler, &'a str)> {
        self.mounts.iter().find_map(|(prefix, handler)| {
            let rest = path.strip_prefix(prefix.as_str())?;
            rest.starts_with('/').then_some((handler, rest))
        })
    }
}

impl Default for Mount {
    fn default() -> Self { Self::new() }
}

impl ErasedHandler for Mount {
    fn call(&self, mut req: Request) -> BoxFuture {
        let Some((handler, rest)) = self.resolve(&req.path) else {
            return Box::pin(async {
                Response::builder()
                    .status(Status::NotFound)
                    .text(Status::NotFound.reason())
            });
        };
        let handler = Arc::clone(handler);
        req.path = rest.to_owned();
        handler.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;

    async fn echo_path(req: Request) -> String {
        req.path().to_owned()
    }

    fn mount() -> BoxedHandler {
        Mount::new().nest("/v1", echo_path.into_boxed_handler()).into_handler()
    }

    #[tokio::test]
    async fn strips_prefix_once() {
        let res = mount().call(Request::get("/v1/listings")).await;
        assert_eq!(res.body(), b"/listings");

        let res = mount().call(Request::get("/v1/v1/listings")).await;
        assert_eq!(res.body(), b"/v1/listings");
    }

    #[tokio::test]
    async fn path_is_forwarded_verbatim() {
        // No percent-decoding and no slash cleaning.
        let res = mount().call(Request::get("/v1/listing%73")).await;
        assert_eq!(res.body(), b"/listing%73");

        let res = mount().call(Request::get("/v1//listings")).await;
        assert_eq!(res.body(), b"//listings");
    }

    #[tokio::test]
    async fn outside_prefix_is_not_found() {
        for path in ["/listings", "/V1/listings", "/v1", "/v10/listings", "/"] {
            let res = mount().call(Request::get(path)).await;
            assert_eq!(res.status_code(), 404, "{path}");
        }
    }

    #[test]
    #[should_panic(expected = "invalid mount prefix")]
    fn trailing_slash_prefix_panics() {
        let _ = Mount::new().nest("/v1/", echo_path.into_boxed_handler());
    }
}
