//! A scripted [`ApiClient`] for tests.
//!
//! Responses are queued per `(method, path)` and consumed in order. A
//! deferred response hands back a [`Responder`]; the request stays in flight
//! until the test settles it, which makes it possible to observe `Pending`
//! state and to settle overlapping requests in any order.

use crate::client::{ApiClient, Method};
use crate::error::{TransportError, TransportResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// One request seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

enum Scripted {
    Ready(TransportResult<Value>),
    Deferred(oneshot::Receiver<TransportResult<Value>>),
}

/// Settles a deferred mock response.
#[derive(Debug)]
pub struct Responder(oneshot::Sender<TransportResult<Value>>);

impl Responder {
    /// Completes the request successfully.
    pub fn resolve(self, body: Value) {
        let _ = self.0.send(Ok(body));
    }

    /// Fails the request with a network error carrying `message`.
    pub fn reject(self, message: impl Into<String>) {
        self.fail(TransportError::Network(message.into()));
    }

    /// Fails the request with an arbitrary transport error.
    pub fn fail(self, error: TransportError) {
        let _ = self.0.send(Err(error));
    }
}

/// In-memory [`ApiClient`] driven by scripted responses.
#[derive(Default)]
pub struct MockClient {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockClient {
    /// Creates a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        lock(&self.routes)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    fn defer(&self, method: Method, path: &str) -> Responder {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Scripted::Deferred(rx));
        Responder(tx)
    }

    /// Queues a successful response for `GET path`.
    pub fn on_get(&self, path: &str, body: Value) {
        self.push(Method::Get, path, Scripted::Ready(Ok(body)));
    }

    /// Queues a network failure with `message` for `GET path`.
    pub fn fail_get(&self, path: &str, message: impl Into<String>) {
        self.push(
            Method::Get,
            path,
            Scripted::Ready(Err(TransportError::Network(message.into()))),
        );
    }

    /// Queues a response for `GET path` that stays pending until settled.
    pub fn defer_get(&self, path: &str) -> Responder {
        self.defer(Method::Get, path)
    }

    /// Queues a successful response for `POST path`.
    pub fn on_post(&self, path: &str, body: Value) {
        self.push(Method::Post, path, Scripted::Ready(Ok(body)));
    }

    /// Queues a network failure with `message` for `POST path`.
    pub fn fail_post(&self, path: &str, message: impl Into<String>) {
        self.push(
            Method::Post,
            path,
            Scripted::Ready(Err(TransportError::Network(message.into()))),
        );
    }

    /// Queues a response for `POST path` that stays pending until settled.
    pub fn defer_post(&self, path: &str) -> Responder {
        self.defer(Method::Post, path)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    async fn respond(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> TransportResult<Value> {
        lock(&self.requests).push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });

        let scripted = lock(&self.routes)
            .get_mut(&(method, path.to_string()))
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::network("mock responder dropped"))),
            None => Err(TransportError::Status {
                status: 404,
                message: format!("no mock response for {method} {path}"),
            }),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl ApiClient for MockClient {
    async fn get(&self, path: &str) -> TransportResult<Value> {
        self.respond(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> TransportResult<Value> {
        self.respond(Method::Post, path, Some(body)).await
    }
}
