//! Model client abstraction
//!
//! A single `invoke` contract sits between the requesters and the generative
//! AI provider. Requests either declare a structured output contract or ask
//! for location-grounded search; responses come back as a tagged
//! [`RawModelResponse`] whose grounding chunks are plain optional-field
//! records.

mod gemini;
mod transport;
mod wire;

pub use gemini::{ClientSettings, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, GeminiClient};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, WayfarerError};
use crate::types::Coordinate;

/// The one capability every requester depends on
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Dispatch a request to the provider. Never retries.
    async fn invoke(&self, request: ModelRequest) -> Result<RawModelResponse>;
}

/// JSON schema the provider is told to conform its answer to
#[derive(Debug, Clone, PartialEq)]
pub struct OutputContract {
    pub name: &'static str,
    pub schema: Value,
}

impl OutputContract {
    pub fn new(name: &'static str, schema: Value) -> Self {
        Self { name, schema }
    }
}

/// Location-grounded map search, anchored at a coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapsGrounding {
    pub coordinate: Coordinate,
}

/// A single generation request
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    pub prompt: String,
    pub output: Option<OutputContract>,
    pub grounding: Option<MapsGrounding>,
    pub cancellation: CancellationToken,
}

impl ModelRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Result<Self> {
        let model = model.into();
        let prompt = prompt.into();

        if model.trim().is_empty() {
            return Err(WayfarerError::invalid_input("model id must not be empty"));
        }
        if prompt.trim().is_empty() {
            return Err(WayfarerError::invalid_input("prompt must not be empty"));
        }

        Ok(Self {
            model,
            prompt,
            output: None,
            grounding: None,
            cancellation: CancellationToken::new(),
        })
    }

    #[must_use]
    pub fn with_output(mut self, contract: OutputContract) -> Self {
        self.output = Some(contract);
        self
    }

    #[must_use]
    pub fn with_maps_grounding(mut self, coordinate: Coordinate) -> Self {
        self.grounding = Some(MapsGrounding { coordinate });
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }
}

/// Provider answer before any contract parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawModelResponse {
    TextOnly { text: String },
    TextWithGrounding { text: String, chunks: Vec<RawChunk> },
}

impl RawModelResponse {
    pub fn text(&self) -> &str {
        match self {
            Self::TextOnly { text } | Self::TextWithGrounding { text, .. } => text,
        }
    }

    /// Grounding chunks; empty for text-only answers
    pub fn chunks(&self) -> &[RawChunk] {
        match self {
            Self::TextOnly { .. } => &[],
            Self::TextWithGrounding { chunks, .. } => chunks,
        }
    }
}

/// Grounding record as sent by the provider; every sub-record may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChunk {
    #[serde(default)]
    pub maps: Option<RawMapsRecord>,
    #[serde(default)]
    pub web: Option<RawWebRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMapsRecord {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWebRecord {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}
