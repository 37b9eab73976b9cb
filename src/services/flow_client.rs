// src/services/flow_client.rs
use reqwest::{Client as HttpClient, StatusCode, header::CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;

use crate::{config::Config, message::FlowRunRequest};

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Backend reachable but answered with a failure status. The body is kept
    /// for the server log only.
    #[error("Flow backend error: {status}")]
    Upstream { status: StatusCode, body: String },

    #[error(
        "Flow backend at {url} returned HTML instead of JSON; check LANGFLOW_API_URL or wait for the backend to finish starting"
    )]
    Configuration { url: String },

    #[error("Failed to connect to AI: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Network("request to flow backend timed out".to_string())
        } else {
            ProxyError::Network(err.to_string())
        }
    }
}

/// Calls the flow backend's run endpoint. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct FlowClient {
    http: HttpClient,
    run_url: String,
    api_key: Option<String>,
}

impl FlowClient {
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            run_url: config.run_url(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn run_url(&self) -> &str {
        &self.run_url
    }

    /// Forward `message` and return the backend's JSON body untouched.
    pub async fn run(&self, message: &str) -> Result<Value, ProxyError> {
        let payload = FlowRunRequest::chat(message);

        tracing::info!(url = %self.run_url, session_id = %payload.session_id, "forwarding chat message");
        tracing::debug!(payload = ?payload, "flow run payload");

        let mut request = self.http.post(&self.run_url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, "flow backend returned an error");
            return Err(ProxyError::Upstream { status, body });
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"));
        if is_html {
            tracing::error!(url = %self.run_url, "flow backend answered with HTML; base URL is likely misconfigured");
            return Err(ProxyError::Configuration {
                url: self.run_url.clone(),
            });
        }

        let bytes = response.bytes().await?;
        let data = serde_json::from_slice::<Value>(&bytes).map_err(|e| {
            tracing::error!(error = %e, "flow backend body is not valid JSON");
            ProxyError::Network(format!("invalid JSON from flow backend: {e}"))
        })?;

        tracing::info!("flow backend responded successfully");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_names_status_only() {
        let err = ProxyError::Upstream {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "<html><body>down</body></html>".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(!msg.contains("<html>"));
    }

    #[test]
    fn configuration_message_mentions_setting() {
        let err = ProxyError::Configuration {
            url: "http://x/api/v1/run/f".to_string(),
        };
        assert!(err.to_string().contains("LANGFLOW_API_URL"));
    }

    #[test]
    fn client_targets_run_url() {
        let config = Config::new("http://backend:7860/").with_flow_id("abc");
        let client = FlowClient::new(&config).unwrap();
        assert_eq!(client.run_url(), "http://backend:7860/api/v1/run/abc");
    }
}
