//! Session lifecycle.
//!
//! ```text
//! Anonymous --restore (stored token validates)--> Authenticated
//! Anonymous --login (authorize, persist, validate)--> Authenticated
//! Authenticated --logout--> Anonymous
//! ```
//!
//! The functions here drive the collaborators; front-ends decide when to
//! call them and how to present the outcome.

use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthClient};
use crate::models::{Credentials, Registration, UserProfile};
use crate::token::TokenStore;

/// Who is using the client.
///
/// A profile and a validated token only exist together, so "logged in"
/// always means both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        user: UserProfile,
        token: String,
    },
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }
}

/// Failure of a login or registration.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The token was issued but could not be persisted.
    #[error("Failed to store session token: {0}")]
    Storage(String),
}

impl SessionError {
    /// Message shown inside the login/register form.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Api(err) => err.user_message(),
            SessionError::Storage(_) => "Could not save your session".to_string(),
        }
    }
}

/// Validates a token and pairs it with the profile it belongs to.
///
/// # Errors
/// Returns the backend error when the token is rejected or unreachable.
pub async fn validate(auth: &dyn AuthClient, token: &str) -> Result<Session, ApiError> {
    let user = auth.check_token(token).await?;
    Ok(Session::Authenticated {
        user,
        token: token.to_string(),
    })
}

/// Restores the session from the token store.
///
/// Any failure leaves the session anonymous; it is logged, never surfaced.
/// The stored token is kept even when validation fails.
pub async fn restore(auth: &dyn AuthClient, store: &dyn TokenStore) -> Session {
    let token = match store.get() {
        Ok(Some(token)) => token,
        Ok(None) => {
            debug!("no stored session token");
            return Session::Anonymous;
        }
        Err(err) => {
            warn!("failed to read stored session token: {err:#}");
            return Session::Anonymous;
        }
    };

    match validate(auth, &token).await {
        Ok(session) => {
            info!("restored session");
            session
        }
        Err(err) => {
            warn!("stored session token rejected: {err}");
            Session::Anonymous
        }
    }
}

/// Signs in: authorize, persist the token, then validate it.
///
/// Nothing is written to the store unless authorize succeeds, and an
/// authenticated session is only returned once validation succeeds.
///
/// # Errors
/// Returns the first failing step.
pub async fn login(
    auth: &dyn AuthClient,
    store: &dyn TokenStore,
    credentials: &Credentials,
) -> Result<Session, SessionError> {
    let issued = auth.authorize(credentials).await?;
    store
        .set(&issued.token)
        .map_err(|err| SessionError::Storage(format!("{err:#}")))?;
    let session = validate(auth, &issued.token).await?;
    info!("signed in");
    Ok(session)
}

/// Creates an account, then signs in with the same credentials.
///
/// # Errors
/// Returns the signup failure, or the login failure that followed it.
pub async fn register(
    auth: &dyn AuthClient,
    store: &dyn TokenStore,
    registration: &Registration,
) -> Result<Session, SessionError> {
    auth.signup(registration).await?;
    debug!("account created");
    login(auth, store, &registration.credentials()).await
}

/// Signs out locally. There is no backend call.
///
/// Safe to call when already anonymous. A store that cannot be cleared is
/// logged and the session is reset anyway.
pub fn logout(store: &dyn TokenStore) -> Session {
    if let Err(err) = store.remove() {
        warn!("failed to remove session token: {err:#}");
    }
    Session::Anonymous
}


#[cfg(test)]
mod tests {
    use super::testing::FakeAuth;
    use super::*;
    use crate::token::MemoryTokenStore;

    fn credentials(password: &str) -> Credentials {
        Credentials {
            email: "ada@example.com".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let auth = FakeAuth::new();
        let store = MemoryTokenStore::with_token("tok-1");

        let session = restore(&auth, &store).await;
        assert!(session.is_logged_in());
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Ada"));
        assert_eq!(session.token(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_restore_without_token_skips_backend() {
        let auth = FakeAuth::new();
        let store = MemoryTokenStore::new();

        assert_eq!(restore(&auth, &store).await, Session::Anonymous);
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_stays_anonymous() {
        let auth = FakeAuth::new();
        let store = MemoryTokenStore::with_token("expired");

        assert_eq!(restore(&auth, &store).await, Session::Anonymous);
        assert_eq!(store.get().unwrap().as_deref(), Some("expired"));
    }

    #[tokio::test]
    async fn test_login_persists_then_validates() {
        let auth = FakeAuth::new();
        let store = MemoryTokenStore::new();

        let session = login(&auth, &store, &credentials("hunter22")).await.unwrap();
        assert!(session.is_logged_in());
        assert_eq!(store.get().unwrap().as_deref(), Some("tok-1"));
        assert_eq!(auth.calls(), vec!["authorize", "check_token"]);
    }

    #[tokio::test]
    async fn test_rejected_authorize_leaves_store_untouched() {
        let auth = FakeAuth::new();
        let store = MemoryTokenStore::new();

        let err = login(&auth, &store, &credentials("wrong")).await.unwrap_err();
        assert_eq!(err.user_message(), "Incorrect email or password");
        assert_eq!(store.writes(), 0);
        assert_eq!(auth.calls(), vec!["authorize"]);
    }

    #[tokio::test]
    async fn test_failed_validation_is_not_logged_in() {
        let mut auth = FakeAuth::new();
        auth.reject_check = true;
        let store = MemoryTokenStore::new();

        let err = login(&auth, &store, &credentials("hunter22")).await.unwrap_err();
        assert!(matches!(err, SessionError::Api(ref api) if api.status() == Some(401)));
        assert_eq!(store.get().unwrap().as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_register_signs_in_afterwards() {
        let auth = FakeAuth::new();
        let store = MemoryTokenStore::new();
        let registration = Registration {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            password: "hunter22".into(),
        };

        let session = register(&auth, &store, &registration).await.unwrap();
        assert!(session.is_logged_in());
        assert_eq!(auth.calls(), vec!["signup", "authorize", "check_token"]);
    }

    #[tokio::test]
    async fn test_register_conflict_aborts_before_login() {
        let auth = FakeAuth::new();
        let store = MemoryTokenStore::new();
        let registration = Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "hunter22".into(),
        };

        let err = register(&auth, &store, &registration).await.unwrap_err();
        assert_eq!(err.user_message(), "Email already registered");
        assert_eq!(auth.calls(), vec!["signup"]);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let store = MemoryTokenStore::with_token("tok-1");

        assert_eq!(logout(&store), Session::Anonymous);
        assert_eq!(logout(&store), Session::Anonymous);
        assert_eq!(store.get().unwrap(), None);
    }
}
