//! Transport layer for the bulletin cache.
//!
//! The cache never talks HTTP itself. It consumes an [`ApiClient`]: two
//! async calls, `get(path)` and `post(path, body)`, each returning parsed
//! JSON or a [`TransportError`] with a human-readable message.
//!
//! - [`HttpClient`]: reqwest-backed client for a real API
//! - [`mock::MockClient`]: scripted in-memory client for tests, with
//!   deferred responders to control when each request settles

mod client;
mod config;
mod error;
mod http;
pub mod mock;

pub use client::{ApiClient, Method};
pub use config::ClientConfig;
pub use error::{TransportError, TransportResult};
pub use http::HttpClient;
