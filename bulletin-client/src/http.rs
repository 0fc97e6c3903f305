//! reqwest-backed [`ApiClient`].

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{TransportError, TransportResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Talks to the remote API over HTTP.
pub struct HttpClient {
    config: ClientConfig,
    client: Client,
}

impl HttpClient {
    /// Creates a client for `config.base_url`.
    pub fn new(config: ClientConfig) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn read_json(response: Response) -> TransportResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| {
                format!(
                    "request failed with status {}",
                    status.canonical_reason().unwrap_or(status.as_str())
                )
            });
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Pulls a message out of a JSON error body (`{"error": ...}` or
/// `{"message": ...}`), falling back to a short plain-text body.
fn error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return ["error", "message"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string);
    }
    let trimmed = body.trim();
    (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_string())
}

fn send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn get(&self, path: &str) -> TransportResult<Value> {
        debug!(method = "GET", path, "Sending request");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(send_error);
        let result = match response {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            warn!(method = "GET", path, error = %e, "Request failed");
        }
        result
    }

    async fn post(&self, path: &str, body: Value) -> TransportResult<Value> {
        debug!(method = "POST", path, "Sending request");
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(send_error);
        let result = match response {
            Ok(response) => Self::read_json(response).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            warn!(method = "POST", path, error = %e, "Request failed");
        }
        result
    }
}
