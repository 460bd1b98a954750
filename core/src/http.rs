//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network. A host either executes requests itself or
//! hands a `Transport` implementation to `TodoService`.
//!
//! Query parameters stay structured (`query`) rather than being baked into
//! `path`, so hosts can encode them with whatever HTTP stack they use and
//! tests can assert on exact keys.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a query parameter by key.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one `HttpRequest`. Implementations must not retry.
///
/// Non-2xx responses are returned as `Ok`; `Err` is reserved for requests
/// that produced no response at all.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}
