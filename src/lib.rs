//! # votegate
//!
//! A small HTTP service for listings and votes, versioned under `/v1`.
//! The handlers are stubs. The interesting part is the gate in front of them:
//!
//! ```text
//! Server → Mount("/v1", strip prefix) → Logging → Authenticate → Router → handler
//! ```
//!
//! - [`middleware::Logging`] writes one access record per request, including
//!   the ones authentication refuses.
//! - [`middleware::Authenticate`] requires `Authorization: Bearer <base64>`
//!   and hands the decoded [`middleware::UserId`] to handlers through
//!   [`Request::user`].
//! - Both log through an injected [`log::RequestLog`], never a global.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use votegate::{Server, api, log::TracingLog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), votegate::Error> {
//!     let app = api::app(Arc::new(TracingLog));
//!     Server::bind("0.0.0.0:6060".parse().unwrap()).await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod mount;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod log;
pub mod middleware;

pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
pub use method::Method;
pub use mount::Mount;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
