//! Auth backend client.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{ApiError, endpoint, read_json};
use crate::models::{AuthToken, Credentials, Registration, UserProfile};

const SERVICE: &str = "auth";

/// Sign-in, sign-up and session validation.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Exchanges credentials for a session token.
    async fn authorize(&self, credentials: &Credentials) -> Result<AuthToken, ApiError>;

    /// Validates a token and returns the profile it belongs to.
    async fn check_token(&self, token: &str) -> Result<UserProfile, ApiError>;

    /// Creates an account. Does not sign in.
    async fn signup(&self, registration: &Registration) -> Result<UserProfile, ApiError>;
}

/// Profile responses come either wrapped (`{"data": {...}}`) or bare,
/// depending on the backend route. Both normalize to `UserProfile`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileEnvelope {
    Wrapped { data: UserProfile },
    Raw(UserProfile),
}

impl From<ProfileEnvelope> for UserProfile {
    fn from(envelope: ProfileEnvelope) -> Self {
        match envelope {
            ProfileEnvelope::Wrapped { data } => data,
            ProfileEnvelope::Raw(profile) => profile,
        }
    }
}

/// HTTP implementation against the newsdesk backend.
///
/// - `POST /signin` with `{email, password}` -> `{token}`
/// - `POST /signup` with `{name, email, password}` -> profile
/// - `GET /users/me` with `Authorization: Bearer <token>` -> profile
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAuthClient {
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn authorize(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "signin"))
            .json(credentials)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                service: SERVICE,
                source,
            })?;
        read_json(SERVICE, response).await
    }

    async fn check_token(&self, token: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "users/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                service: SERVICE,
                source,
            })?;
        let envelope: ProfileEnvelope = read_json(SERVICE, response).await?;
        Ok(envelope.into())
    }

    async fn signup(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "signup"))
            .json(registration)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                service: SERVICE,
                source,
            })?;
        let envelope: ProfileEnvelope = read_json(SERVICE, response).await?;
        Ok(envelope.into())
    }
}
