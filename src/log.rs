//! Request logging capability.
//!
//! The middleware never log through an ambient global. They hold an
//! `Arc<dyn RequestLog>` created once at startup, so tests can swap in a
//! recorder and assert on exactly what was logged.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::method::Method;
use crate::middleware::auth::{AuthError, UserId};

/// One completed request, as observed by [`Logging`](crate::middleware::Logging).
#[derive(Clone, Debug, PartialEq)]
pub struct AccessEntry {
    pub status: u16,
    pub method: Method,
    pub path: String,
    pub elapsed: Duration,
}

/// Sink for the events the middleware emit.
pub trait RequestLog: Send + Sync + 'static {
    /// Exactly once per request that reaches the logging layer.
    fn access(&self, entry: &AccessEntry);

    /// The authentication layer refused a request.
    fn rejected(&self, error: &AuthError);

    /// An authenticated request finished downstream.
    fn authenticated(&self, user: &UserId);
}

/// Production [`RequestLog`]: structured `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl RequestLog for TracingLog {
    fn access(&self, entry: &AccessEntry) {
        info!(
            status = entry.status,
            method = %entry.method,
            path = %entry.path,
            elapsed = ?entry.elapsed,
            "request"
        );
    }

    fn rejected(&self, error: &AuthError) {
        match error {
            AuthError::MissingBearer => debug!("rejected request: {error}"),
            AuthError::InvalidEncoding(_) => warn!("rejected request: {error}"),
        }
    }

    fn authenticated(&self, user: &UserId) {
        debug!(user = %user, "request served for user");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Event {
        Access { status: u16, method: Method, path: String },
        Rejected(String),
        Authenticated(String),
    }

    /// Records events in order; elapsed times are dropped so tests can compare.
    #[derive(Default)]
    pub(crate) struct MemoryLog {
        events: Mutex<Vec<Event>>,
    }

    impl MemoryLog {
        pub(crate) fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        pub(crate) fn access_count(&self) -> usize {
            self.events().iter().filter(|e| matches!(e, Event::Access { .. })).count()
        }
    }

    impl RequestLog for MemoryLog {
        fn access(&self, entry: &AccessEntry) {
            self.events.lock().unwrap().push(Event::Access {
                status: entry.status,
                method: entry.method.clone(),
                path: entry.path.clone(),
            });
        }

        fn rejected(&self, error: &AuthError) {
            self.events.lock().unwrap().push(Event::Rejected(error.to_string()));
        }

        fn authenticated(&self, user: &UserId) {
            self.events.lock().unwrap().push(Event::Authenticated(user.to_string()));
        }
    }
}
