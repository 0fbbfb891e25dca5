use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;
use url::Url;

use super::transport::{HttpRequest, ReqwestTransport, Transport};
use super::wire::{ErrorEnvelope, GenerateContentResponse};
use super::{ModelClient, ModelRequest, RawModelResponse};
use crate::config::Config;
use crate::error::{ProviderError, Result, WayfarerError};
use crate::log_debug;

/// Public Gemini API host
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on a single `invoke`
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how long the client talks to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: Url,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let mut endpoint = Url::parse(endpoint).map_err(|e| {
            WayfarerError::configuration(format!("invalid endpoint '{endpoint}': {e}"))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(WayfarerError::configuration(format!(
                "endpoint '{endpoint}' cannot be used as a base URL"
            )));
        }
        if timeout.is_zero() {
            return Err(WayfarerError::configuration("timeout must be greater than zero"));
        }

        // Relative joins replace the last segment unless the path ends in '/'
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Ok(Self { endpoint, timeout })
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
            .expect("default endpoint should always parse")
    }
}

/// Model client for the Gemini `generateContent` API
pub struct GeminiClient<T = ReqwestTransport> {
    api_key: String,
    settings: ClientSettings,
    transport: T,
}

impl GeminiClient<ReqwestTransport> {
    /// Build the production client, failing fast when no credential is configured
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;
        let settings = config.client_settings()?;
        Ok(Self::new(api_key, settings, ReqwestTransport::new()))
    }
}

impl<T: Transport> GeminiClient<T> {
    pub fn new(api_key: impl Into<String>, settings: ClientSettings, transport: T) -> Self {
        Self {
            api_key: api_key.into(),
            settings,
            transport,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// URL of the `generateContent` method for a model
    pub fn endpoint_for(&self, model: &str) -> Result<Url> {
        self.settings
            .endpoint
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| WayfarerError::invalid_input(format!("invalid model id '{model}': {e}")))
    }

    /// JSON body for a request
    pub fn request_body(request: &ModelRequest) -> Value {
        let mut body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": request.prompt }]
                }
            ]
        });

        if let Some(contract) = &request.output {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": contract.schema
            });
        }

        if let Some(grounding) = &request.grounding {
            body["tools"] = json!([{ "googleMaps": {} }]);
            body["toolConfig"] = json!({
                "retrievalConfig": {
                    "latLng": {
                        "latitude": grounding.coordinate.latitude,
                        "longitude": grounding.coordinate.longitude
                    }
                }
            });
        }

        body
    }
}

#[async_trait]
impl<T: Transport> ModelClient for GeminiClient<T> {
    async fn invoke(&self, request: ModelRequest) -> Result<RawModelResponse> {
        if self.api_key.trim().is_empty() {
            return Err(WayfarerError::configuration(
                "no API key configured. Set WAYFARER_API_KEY or GEMINI_API_KEY, or run `wayfarer config --api-key <key>`",
            ));
        }

        let http_request = HttpRequest {
            url: self.endpoint_for(&request.model)?,
            headers: vec![("x-goog-api-key", self.api_key.clone())],
            body: Self::request_body(&request),
        };

        log_debug!(
            "Invoking {} (contract: {}, grounded: {})",
            request.model,
            request.output.as_ref().map_or("none", |c| c.name),
            request.grounding.is_some()
        );

        let timeout = self.settings.timeout;
        let exchange = tokio::time::timeout(timeout, self.transport.post_json(http_request));

        let response = tokio::select! {
            biased;
            () = request.cancellation.cancelled() => {
                log_debug!("Request to {} cancelled", request.model);
                return Err(ProviderError::Cancelled.into());
            }
            outcome = exchange => outcome.map_err(|_| ProviderError::Timeout(timeout))??,
        };

        if !response.is_success() {
            let message = error_message(&response.body);
            log_debug!("Provider returned HTTP {}: {}", response.status, message);
            return Err(ProviderError::from_status(response.status, message).into());
        }

        parse_response(&response.body, request.grounding.is_some())
    }
}

/// Extract the provider's error message, falling back to the raw body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match (envelope.error.status, envelope.error.message) {
            (Some(status), Some(message)) => format!("{status}: {message}"),
            (None, Some(message)) => message,
            (Some(status), None) => status,
            (None, None) => "no error details".to_string(),
        },
        Err(_) => body.chars().take(500).collect(),
    }
}

fn parse_response(body: &str, grounded: bool) -> Result<RawModelResponse> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| WayfarerError::malformed("provider", format!("invalid response body: {e}")))?;

    let Some(candidate) = envelope.candidates.into_iter().next() else {
        if let Some(reason) = envelope.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ProviderError::Blocked(reason).into());
        }
        return Err(WayfarerError::malformed(
            "provider",
            "response contained no candidates",
        ));
    };

    if let Some(reason) = &candidate.finish_reason {
        log_debug!("Candidate finished with reason {}", reason);
    }

    let text = candidate.text();
    match candidate.grounding_metadata {
        Some(metadata) => Ok(RawModelResponse::TextWithGrounding {
            text,
            chunks: metadata.grounding_chunks,
        }),
        None if grounded => Ok(RawModelResponse::TextWithGrounding {
            text,
            chunks: Vec::new(),
        }),
        None => Ok(RawModelResponse::TextOnly { text }),
    }
}
