//! Incoming HTTP request type.

use std::collections::HashMap;

use http::HeaderMap;

use crate::method::Method;
use crate::middleware::auth::UserId;

/// An incoming HTTP request, as seen by middleware and handlers.
///
/// The path is the one the current layer matches against: below the `/v1`
/// mount it has the prefix already stripped. The body is never read: no
/// handler consumes one.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) params: HashMap<String, String>,
    pub(crate) user: Option<UserId>,
}

impl Request {
    pub(crate) fn new(method: Method, path: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            path: path.into(),
            headers,
            params: HashMap::new(),
            user: None,
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// Case-insensitive header lookup. Values that are not visible ASCII read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/listing/{id}`, `req.param("id")` on `/listing/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The identity attached by [`Authenticate`](crate::middleware::Authenticate).
    ///
    /// `None` only when the handler is reached without the authentication layer.
    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }
}

#[cfg(test)]
impl Request {
    pub(crate) fn get(path: &str) -> Self {
        Self::new(Method::Get, path, HeaderMap::new())
    }

    pub(crate) fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.insert(name, value.parse().unwrap());
        self
    }
}
