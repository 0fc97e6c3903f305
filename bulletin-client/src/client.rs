use crate::error::TransportResult;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// HTTP method of a request issued through an [`ApiClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// The transport the cache's async operations call.
///
/// `path` is the request path plus query string (`/fakeApi/posts`,
/// `/fakeApi/notifications?since=...`). Implementations only distinguish
/// success from failure; status codes beyond that are not interpreted.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetches `path` and returns the parsed JSON body.
    async fn get(&self, path: &str) -> TransportResult<Value>;

    /// Sends `body` as JSON to `path` and returns the parsed JSON response.
    async fn post(&self, path: &str, body: Value) -> TransportResult<Value>;
}
