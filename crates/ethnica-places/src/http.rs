//! Shared HTTP plumbing for the provider clients.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Placeholder written over secrets in logged URLs.
pub const REDACTED: &str = "API_KEY_HIDDEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl HttpOptions {
    #[must_use]
    pub fn from_config(config: &ethnica_core::AppConfig) -> Self {
        Self {
            timeout_secs: config.provider_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "ethnica/0.1 (business-discovery)".to_string(),
        }
    }
}

/// Build a client with an explicit request timeout. A timed-out request
/// surfaces as [`ProviderError::Http`].
pub(crate) fn build_client(options: &HttpOptions) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(options.timeout_secs))
        .connect_timeout(Duration::from_secs(
            options.timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS),
        ))
        .user_agent(options.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Parse a base URL, normalised to end in exactly one slash so that
/// `Url::join` appends rather than replacing the last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ProviderError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Join a relative path onto a normalised base URL.
pub(crate) fn join(base: &Url, path: &str) -> Result<Url, ProviderError> {
    base.join(path).map_err(|e| ProviderError::InvalidBaseUrl {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })
}

/// Render `url` with the value of `param` replaced by [`REDACTED`].
#[must_use]
pub fn redact_query(url: &Url, param: &str) -> String {
    if !url.query_pairs().any(|(k, _)| k == param) {
        return url.to_string();
    }
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == param {
                REDACTED.to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// GET `url` and decode a JSON body.
///
/// Non-2xx responses become [`ProviderError::UnexpectedStatus`]; the URL in
/// the error and in logs has `secret_param` redacted.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    secret_param: &str,
    context: &str,
) -> Result<T, ProviderError> {
    let logged = redact_query(&url, secret_param);
    tracing::debug!(url = %logged, "provider request");

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(url = %logged, status = status.as_u16(), body = %body, "provider returned non-success status");
        return Err(ProviderError::UnexpectedStatus {
            status: status.as_u16(),
            url: logged,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|source| ProviderError::Deserialize {
        context: context.to_string(),
        source,
    })
}
