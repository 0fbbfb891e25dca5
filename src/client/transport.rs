//! HTTP transport seam under the Gemini client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::ProviderError;
use crate::log_debug;

/// Outbound JSON POST
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

/// Status and raw body of the provider's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and reports the status; classification happens above
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError>;
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
        log_debug!("POST {}", request.url.path());

        let mut builder = self
            .client
            .post(request.url)
            .header("Content-Type", "application/json");
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .json(&request.body)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Unreachable(format!("failed to read response body: {e}")))?;

        log_debug!("Provider answered HTTP {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}
