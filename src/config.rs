use crate::client::{ClientSettings, DEFAULT_ENDPOINT};
use crate::error::WayfarerError;
use crate::{log_debug, log_info};

use anyhow::{Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables checked for the provider credential, in order
pub const API_KEY_ENV_VARS: &[&str] = &["WAYFARER_API_KEY", "GEMINI_API_KEY", "API_KEY"];

/// Configuration structure for Wayfarer
#[derive(Deserialize, Serialize, Clone)]
pub struct Config {
    /// API key for the generative AI provider
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    /// Base URL of the provider API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model ids per operation
    #[serde(default)]
    pub models: ModelConfig,
    /// Upper bound for a single provider call, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Model selection per operation
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelConfig {
    /// Model for structured itinerary generation
    #[serde(default = "default_structured_model")]
    pub plan: String,
    /// Model for structured budget estimation
    #[serde(default = "default_structured_model")]
    pub budget: String,
    /// Model for map-grounded nearby search
    #[serde(default = "default_nearby_model")]
    pub nearby: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            plan: default_structured_model(),
            budget: default_structured_model(),
            nearby: default_nearby_model(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_structured_model() -> String {
    "gemini-3-flash-preview".to_string()
}

// Map grounding is only offered on the 2.5 family
fn default_nearby_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Config {
    /// Load the configuration from the user config file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        log_debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Load a configuration file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| {
            anyhow!(
                "Invalid configuration file {}: {}. Please check it for syntax errors.",
                path.display(),
                e
            )
        })
    }

    /// Take the credential from the environment when one is set there
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
        {
            self.api_key = key;
        }
    }

    /// Save the configuration to the user config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        log_info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("wayfarer");
        path.push("config.toml");
        Ok(path)
    }

    /// The credential, or a configuration error when none is set
    pub fn api_key(&self) -> Result<String, WayfarerError> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(WayfarerError::configuration(format!(
                "no API key configured. Set one of {} or run `wayfarer config --api-key <key>`",
                API_KEY_ENV_VARS.join(", ")
            )));
        }
        Ok(key.to_string())
    }

    /// Endpoint and timeout for the model client
    pub fn client_settings(&self) -> Result<ClientSettings, WayfarerError> {
        ClientSettings::new(&self.endpoint, Duration::from_secs(self.timeout_seconds))
    }

    /// Update the configuration with new values
    pub fn update(
        &mut self,
        api_key: Option<String>,
        endpoint: Option<String>,
        models: ModelOverrides,
        timeout_seconds: Option<u64>,
    ) -> Result<()> {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(model) = models.plan {
            self.models.plan = model;
        }
        if let Some(model) = models.budget {
            self.models.budget = model;
        }
        if let Some(model) = models.nearby {
            self.models.nearby = model;
        }
        if let Some(timeout) = timeout_seconds {
            self.timeout_seconds = timeout;
        }

        // Reject settings the client could not use before they are persisted
        self.client_settings()?;

        log_debug!("Configuration updated: {:?}", self);
        Ok(())
    }
}

/// Optional model replacements passed to [`Config::update`]
#[derive(Debug, Clone, Default)]
pub struct ModelOverrides {
    pub plan: Option<String>,
    pub budget: Option<String>,
    pub nearby: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            models: ModelConfig::default(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// The credential never reaches debug logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "api_key",
                &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" },
            )
            .field("endpoint", &self.endpoint)
            .field("models", &self.models)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
