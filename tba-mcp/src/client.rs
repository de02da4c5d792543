//! TBA API client.
//!
//! HTTP gateway for the upstream The Blue Alliance REST API. Builds the
//! absolute URL, attaches the auth and accept headers, performs the GET,
//! and classifies the outcome. Response bodies are returned as raw JSON;
//! shape validation is the dispatcher's job, not the gateway's.

use crate::config::Config;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, instrument, warn};

/// Header carrying the API key on every upstream request.
pub const AUTH_HEADER: &str = "X-TBA-Auth-Key";

/// TBA client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, connection, timeout) or an
    /// unparseable response body.
    #[error("TBA API request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream returned a non-2xx status.
    #[error("TBA API request failed: {status} {reason} for {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// HTTP status text.
        reason: String,
        /// Relative path of the attempted request.
        path: String,
    },
}

/// Client for the upstream TBA API.
#[derive(Clone)]
pub struct TbaClient {
    /// HTTP client instance.
    client: Client,

    /// Resolved configuration (base URL, API key, timeout).
    config: Config,
}

impl TbaClient {
    /// Create a new TBA client.
    pub fn new(config: Config) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Fetch a relative path and parse the body as JSON.
    ///
    /// The caller supplies a leading `/`; all request parameters are
    /// embedded in the path. Non-2xx statuses fail without inspecting
    /// the body; nothing is retried.
    #[instrument(skip(self))]
    pub async fn fetch_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = self.config.url(path);

        let response = match self
            .client
            .get(&url)
            .header(AUTH_HEADER, &self.config.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(path, error = %e, "TBA API request failed to send");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "TBA API returned an error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                path: path.to_string(),
            });
        }

        response.json().await.map_err(|e| {
            error!(path, error = %e, "TBA API response body was not valid JSON");
            ClientError::Request(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = Config::new("http://localhost:3000", "test-key");
        let client = TbaClient::new(config);
        assert_eq!(client.config.api_key, "test-key");
    }

    #[test]
    fn test_status_error_includes_code_and_path() {
        let err = ClientError::Status {
            status: 404,
            reason: "Not Found".to_string(),
            path: "/team/frc86".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("/team/frc86"));
    }
}
