//! Error taxonomy for the orchestration layer.
//!
//! Every operation settles to a value or to one of these classified errors.
//! The model client never retries; [`WayfarerError::is_retryable`] tells the
//! caller whether a retry policy may apply.

use std::time::Duration;

/// Result alias used throughout the library
pub type Result<T, E = WayfarerError> = std::result::Result<T, E>;

/// Top-level error returned by the client, requesters and orchestrator
#[derive(Debug, thiserror::Error)]
pub enum WayfarerError {
    /// Missing or invalid credential/configuration. Fatal.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A request parameter was rejected before anything was sent
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The provider could not be reached or refused the request
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The provider answered successfully but the payload does not fit the contract
    #[error("malformed {context} response: {detail}")]
    MalformedResponse {
        context: &'static str,
        detail: String,
    },
}

impl WayfarerError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn malformed(context: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            context,
            detail: detail.into(),
        }
    }

    /// Whether a caller-side retry with backoff could reasonably succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(err) => err.is_retryable(),
            Self::Configuration(_) | Self::InvalidInput(_) | Self::MalformedResponse { .. } => {
                false
            }
        }
    }
}

/// Classified provider-side failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider rejected the credential (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("provider rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("provider rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("provider failed (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("provider blocked the prompt: {0}")]
    Blocked(String),

    #[error("provider did not answer within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,
}

impl ProviderError {
    /// Map a non-success HTTP status and its body message to an error kind
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status, message },
            429 => Self::RateLimited(message),
            400..=499 => Self::Rejected { status, message },
            _ => Self::Upstream { status, message },
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unreachable(_) | Self::RateLimited(_) | Self::Upstream { .. } | Self::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ProviderError::from_status(401, String::new()),
            ProviderError::Unauthorized { status: 401, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(403, String::new()),
            ProviderError::Unauthorized { status: 403, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(429, "quota".to_string()),
            ProviderError::RateLimited(_)
        ));
        assert!(matches!(
            ProviderError::from_status(400, "bad schema".to_string()),
            ProviderError::Rejected { status: 400, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(503, String::new()),
            ProviderError::Upstream { status: 503, .. }
        ));
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(WayfarerError::from(ProviderError::Timeout(Duration::from_secs(30))).is_retryable());
        assert!(WayfarerError::from(ProviderError::RateLimited(String::new())).is_retryable());
        assert!(!WayfarerError::from(ProviderError::Cancelled).is_retryable());
        assert!(
            !WayfarerError::from(ProviderError::from_status(401, String::new())).is_retryable()
        );
        assert!(!WayfarerError::configuration("missing key").is_retryable());
        assert!(!WayfarerError::malformed("plan", "not json").is_retryable());
    }

    #[test]
    fn test_timeout_message() {
        let err = ProviderError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "provider did not answer within 30s");
    }
}
