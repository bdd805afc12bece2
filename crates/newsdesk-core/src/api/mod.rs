//! HTTP clients for the external collaborators.
//!
//! - `auth.rs`: sign-in, sign-up and token validation against the backend
//! - `news.rs`: keyword search against a NewsAPI-compatible service
//! - `saved.rs`: the signed-in user's saved articles
//!
//! Each collaborator is a trait so the front-ends can be driven by in-memory
//! fakes in tests. The HTTP implementations share the helpers below.

pub mod auth;
pub mod news;
pub mod saved;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

pub use auth::{AuthClient, HttpAuthClient};
pub use news::{NewsApiClient, NewsClient};
pub use saved::{HttpSavedItemsClient, SavedItemsClient};

use crate::config::HttpConfig;

/// Maximum number of characters of a raw error body kept in messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failure talking to one of the HTTP collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{service} request failed ({status}): {message}")]
    Status {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// The request never produced a response.
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not match the expected shape.
    #[error("{service} returned an unexpected response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A required setting is missing.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl ApiError {
    /// HTTP status of the failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for showing inside a form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Status { status, .. } => format!("Request failed with status {status}"),
            ApiError::Transport { .. } => "Could not reach the server".to_string(),
            ApiError::Decode { .. } => "The server sent an unexpected response".to_string(),
            ApiError::NotConfigured(setting) => format!("{setting} is not configured"),
        }
    }
}

/// Builds the shared HTTP client.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialised.
pub fn http_client(config: &HttpConfig) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("newsdesk/", env!("CARGO_PKG_VERSION"))),
    );
    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Parses a configured base URL so endpoint joins are predictable.
///
/// # Errors
/// Returns an error if the value is not an absolute URL.
pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{trimmed}/"))
        .map_err(|err| anyhow::anyhow!("Invalid base URL '{raw}': {err}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("Invalid base URL '{raw}': not a base URL");
    }
    Ok(url)
}

/// Joins a relative endpoint path onto a base URL that ends in `/`.
pub(crate) fn endpoint(base: &Url, path: &str) -> Url {
    base.join(path.trim_start_matches('/'))
        .unwrap_or_else(|_| base.clone())
}

/// Reads a response body, mapping non-success statuses to `ApiError::Status`.
pub(crate) async fn read_body(
    service: &'static str,
    response: reqwest::Response,
) -> Result<String, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ApiError::Transport { service, source })?;
    if !status.is_success() {
        return Err(ApiError::Status {
            service,
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(body)
}

/// Reads and decodes a JSON response body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let body = read_body(service, response).await?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode { service, source })
}

/// Extracts a readable message from an error body.
///
/// Backends answer `{"message": "..."}`; the news API answers
/// `{"status": "error", "code": "...", "message": "..."}`. Anything else is
/// passed through, truncated.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(serde_json::Value::as_str)
    {
        return message.to_string();
    }
    body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
}
