// src/client/transport.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::message::{ChatRequest, ErrorResponse};

pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("unreadable proxy response: {0}")]
    Decode(String),
}

/// How a chat session reaches the proxy.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_message(&self, message: &str) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpChatTransport {
    http: HttpClient,
    chat_url: String,
}

impl HttpChatTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, DEFAULT_CLIENT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            chat_url: format!("{}/api/chat", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn post_message(&self, message: &str) -> Result<Value, TransportError> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        let response = self.http.post(&self.chat_url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(err) if !err.error.is_empty() => err.error,
                Ok(_) => format!("HTTP {}", status.as_u16()),
                Err(_) => "Unknown error".to_string(),
            };
            return Err(TransportError::Status { status, message });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
