//! The versioned listing/vote API.
//!
//! Every handler is a stub that answers with a fixed line of text. Listings
//! and votes share the same five handlers.
//!
//! | Method | Path (under `/v1`) | Body |
//! |---|---|---|
//! | GET    | `/listing/{id}`, `/vote/{id}` | `Show by ID` |
//! | GET    | `/listings`, `/votes`         | `Index all` |
//! | PUT    | `/listing/{id}`, `/vote/{id}` | `Update by ID` |
//! | POST   | `/listing`, `/vote`           | `Create new` |
//! | DELETE | `/listing/{id}`, `/vote/{id}` | `Destroy by ID` |

use std::sync::Arc;

use crate::handler::BoxedHandler;
use crate::log::RequestLog;
use crate::method::Method;
use crate::middleware::{Authenticate, Chain, Logging};
use crate::mount::Mount;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

pub const PREFIX: &str = "/v1";

pub async fn index_all(_req: Request) -> Response {
    Response::text("Index all\n")
}

pub async fn show_by_id(_req: Request) -> Response {
    Response::text("Show by ID\n")
}

pub async fn create(_req: Request) -> Response {
    Response::text("Create new\n")
}

pub async fn update_by_id(_req: Request) -> Response {
    Response::text("Update by ID\n")
}

pub async fn destroy_by_id(_req: Request) -> Response {
    Response::text("Destroy by ID\n")
}

/// The `/v1` routing table, prefix-free.
pub fn v1() -> Router {
    Router::new()
        // listings
        .on(Method::Get,    "/listing/{id}", show_by_id)
        .on(Method::Get,    "/listings",     index_all)
        .on(Method::Put,    "/listing/{id}", update_by_id)
        .on(Method::Post,   "/listing",      create)
        .on(Method::Delete, "/listing/{id}", destroy_by_id)
        // votes
        .on(Method::Get,    "/vote/{id}",    show_by_id)
        .on(Method::Get,    "/votes",        index_all)
        .on(Method::Put,    "/vote/{id}",    update_by_id)
        .on(Method::Post,   "/vote",         create)
        .on(Method::Delete, "/vote/{id}",    destroy_by_id)
}

/// The whole application: `/v1` behind logging and authentication.
pub fn app(log: Arc<dyn RequestLog>) -> BoxedHandler {
    let gated = Chain::new()
        .with(Logging::new(Arc::clone(&log)))
        .with(Authenticate::new(log))
        .apply(v1().into_handler());

    Mount::new().nest(PREFIX, gated).into_handler()
}

#[cfg(test)]
mod tests {
    use http::HeaderMap;

    use super::*;
    use crate::log::testing::{Event, MemoryLog};

    const TOKEN: &str = "Bearer bXlTZWNyZXRUb2tlbjEyMw==";

    fn authed(method: Method, path: &str) -> Request {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", TOKEN.parse().unwrap());
        Request::new(method, path, headers)
    }

    #[tokio::test]
    async fn routes_match_the_table() {
        let app = app(Arc::new(MemoryLog::default()));
        let cases = [
            (Method::Get,    "/v1/listing/42", "Show by ID\n"),
            (Method::Get,    "/v1/listings",   "Index all\n"),
            (Method::Get,    "/v1/vote/7",     "Show by ID\n"),
            (Method::Get,    "/v1/votes",      "Index all\n"),
            (Method::Put,    "/v1/listing/42", "Update by ID\n"),
            (Method::Put,    "/v1/vote/7",     "Update by ID\n"),
            (Method::Post,   "/v1/listing",    "Create new\n"),
            (Method::Post,   "/v1/vote",       "Create new\n"),
            (Method::Delete, "/v1/listing/42", "Destroy by ID\n"),
            (Method::Delete, "/v1/vote/7",     "Destroy by ID\n"),
        ];
        for (method, path, body) in cases {
            let res = app.call(authed(method.clone(), path)).await;
            assert_eq!(res.status_code(), 200, "{method} {path}");
            assert_eq!(res.body(), body.as_bytes(), "{method} {path}");
        }
    }

    #[tokio::test]
    async fn every_route_requires_a_token() {
        let app = app(Arc::new(MemoryLog::default()));
        for path in ["/v1/listings", "/v1/vote/1", "/v1/nowhere"] {
            let res = app.call(Request::get(path)).await;
            assert_eq!(res.status_code(), 401, "{path}");
        }
    }

    #[tokio::test]
    async fn extension_methods_pass_through_the_gate() {
        let log = Arc::new(MemoryLog::default());
        let app = app(log.clone());
        let purge = || Method::Other("PURGE".into());

        let res = app.call(Request::new(purge(), "/v1/listings", HeaderMap::new())).await;
        assert_eq!(res.status_code(), 401);
        assert_eq!(log.access_count(), 1);
        assert!(log.events().contains(&Event::Access {
            status: 401,
            method: purge(),
            path: "/listings".into(),
        }));

        let res = app.call(authed(purge(), "/v1/listings")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("GET, HEAD"));
        assert_eq!(log.access_count(), 2);
    }

    #[tokio::test]
    async fn logs_stripped_path_and_final_status() {
        let log = Arc::new(MemoryLog::default());
        let app = app(log.clone());

        app.call(authed(Method::Get, "/v1/listings")).await;
        assert_eq!(log.events(), [
            Event::Authenticated("mySecretToken123".into()),
            Event::Access { status: 200, method: Method::Get, path: "/listings".into() },
        ]);
    }

    #[tokio::test]
    async fn unmounted_paths_skip_the_middleware() {
        let log = Arc::new(MemoryLog::default());
        let res = app(log.clone()).call(authed(Method::Get, "/listings")).await;
        assert_eq!(res.status_code(), 404);
        assert!(log.events().is_empty());
    }

    #[tokio::test]
    async fn repeated_requests_are_identical() {
        let app = app(Arc::new(MemoryLog::default()));
        let first = app.call(authed(Method::Get, "/v1/vote/3")).await;
        let second = app.call(authed(Method::Get, "/v1/vote/3")).await;
        assert_eq!(first.status_code(), second.status_code());
        assert_eq!(first.body(), second.body());
    }
}
