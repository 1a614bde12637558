use thiserror::Error;

/// Errors returned by a place provider.
///
/// Every variant is recoverable from the orchestrator's point of view: a
/// failing provider is skipped and the next one is tried.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The provider answered, but with a non-OK status in its envelope.
    #[error("{provider} returned status {status}: {message}")]
    Status {
        provider: &'static str,
        status: String,
        message: String,
    },

    /// The key or token this provider needs is not configured.
    #[error("{provider} is not configured")]
    NotConfigured { provider: &'static str },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ProviderError {
    /// `true` for the "key absent" class, which is reported as a configuration
    /// notice rather than a degraded-path warning.
    #[must_use]
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }
}
