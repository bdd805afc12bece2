use std::sync::Arc;

use newsdesk_core::api::AuthClient;
use newsdesk_core::session;
use newsdesk_core::token::TokenStore;
use tracing::warn;

use crate::events::UiEvent;
use crate::session::AuthRequest;

/// Validates the token read from the store at mount.
pub async fn validate_token(auth: Arc<dyn AuthClient>, token: String) -> UiEvent {
    let result = session::validate(auth.as_ref(), &token)
        .await
        .map_err(|err| err.to_string());
    UiEvent::SessionRestored { result }
}

/// Runs a login, or a signup followed by a login.
pub async fn authenticate(
    auth: Arc<dyn AuthClient>,
    tokens: Arc<dyn TokenStore>,
    request: AuthRequest,
) -> UiEvent {
    let result = match &request {
        AuthRequest::Login(credentials) => {
            session::login(auth.as_ref(), tokens.as_ref(), credentials).await
        }
        AuthRequest::Register(registration) => {
            session::register(auth.as_ref(), tokens.as_ref(), registration).await
        }
    };
    let result = result.map_err(|err| {
        warn!("authentication failed: {err}");
        err.user_message()
    });
    UiEvent::AuthResult { result }
}

/// Removes the stored token. Runs inline; the reducer has already reset
/// the session.
pub fn clear_token(tokens: &dyn TokenStore) {
    let _ = session::logout(tokens);
}
