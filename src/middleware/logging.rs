//! Access logging: method, path, status, latency. One record per request.

use std::sync::Arc;
use std::time::Instant;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::log::{AccessEntry, RequestLog};
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Emits one [`AccessEntry`] per request after the inner handler returns.
///
/// Place it first in the [`Chain`](crate::middleware::Chain) so it also sees
/// requests the authentication layer refuses. A handler that panics unwinds
/// past this layer and leaves no record.
pub struct Logging {
    log: Arc<dyn RequestLog>,
}

impl Logging {
    pub fn new(log: Arc<dyn RequestLog>) -> Self {
        Self { log }
    }
}

impl Middleware for Logging {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Arc::new(LoggingHandler { next, log: Arc::clone(&self.log) })
    }
}

struct LoggingHandler {
    next: BoxedHandler,
    log: Arc<dyn RequestLog>,
}

impl ErasedHandler for LoggingHandler {
    fn call(&self, req: Request) -> BoxFuture {
        let next = Arc::clone(&self.next);
        let log = Arc::clone(&self.log);
        Box::pin(async move {
            let start = Instant::now();
            let method = req.method().clone();
            let path = req.path().to_owned();

            let mut recorder = StatusRecorder::new();
            let res = next.call(req).await;
            recorder.write_status(&res);

            log.access(&AccessEntry {
                status: recorder.status(),
                method,
                path,
                elapsed: start.elapsed(),
            });
            res
        })
    }
}

/// Remembers the status a response went out with.
///
/// Starts at `200 OK`; the first write wins, matching how a status line can
/// only be sent once.
#[derive(Debug)]
struct StatusRecorder {
    status: u16,
    written: bool,
}

impl StatusRecorder {
    fn new() -> Self {
        Self { status: Status::Ok.into(), written: false }
    }

    fn write_status(&mut self, res: &Response) {
        if !self.written {
            self.status = res.status_code();
            self.written = true;
        }
    }

    fn status(&self) -> u16 {
        self.status
    }
}
