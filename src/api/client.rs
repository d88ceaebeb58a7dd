use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;

use super::types::{GenerateRequest, Message, UpgradeLink, Usage};
use crate::core::tool::Tool;

/// Errors that can occur while talking to the generation service.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Client misconfigured (bad base URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Free quota used up; the service answered 403.
    QuotaExceeded(String),
    /// Any other non-success response.
    Api { status: u16, message: String },
    /// The body could not be decoded.
    Parse(String),
}

impl BackendError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, BackendError::QuotaExceeded(_))
    }

    /// Classifies a non-success status. 403 is the service's plan-limit signal.
    fn from_status(status: StatusCode, message: String) -> Self {
        if status == StatusCode::FORBIDDEN {
            BackendError::QuotaExceeded(message)
        } else {
            BackendError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::QuotaExceeded(msg) => write!(f, "quota exceeded: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Sends the full transcript to the tool's endpoint and returns the reply.
    async fn generate(&self, tool: Tool, messages: &[Message]) -> Result<Message, BackendError>;

    /// Reads the current free-tier usage.
    async fn usage(&self) -> Result<Usage, BackendError>;

    /// Asks the service for a checkout link to upgrade the plan.
    async fn upgrade_link(&self) -> Result<UpgradeLink, BackendError>;
}

/// reqwest-backed client for the generation service.
pub struct HttpBackend {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            auth_token,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, BackendError> {
        reqwest::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| BackendError::Config(format!("invalid base URL {}: {e}", self.base_url)))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and decodes a JSON body, mapping failures onto `BackendError`.
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Backend response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error: {} - {}", status, body);
            return Err(BackendError::from_status(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, tool: Tool, messages: &[Message]) -> Result<Message, BackendError> {
        let url = self.url(tool.endpoint())?;
        info!(
            "POST {} with {} message(s)",
            tool.endpoint(),
            messages.len()
        );
        let builder = self.client.post(url).json(&GenerateRequest { messages });
        self.send_json(builder).await
    }

    async fn usage(&self) -> Result<Usage, BackendError> {
        let url = self.url("/api/usage")?;
        self.send_json(self.client.get(url)).await
    }

    async fn upgrade_link(&self) -> Result<UpgradeLink, BackendError> {
        let url = self.url("/api/stripe")?;
        self.send_json(self.client.get(url)).await
    }
}
