use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use newsdesk_core::api::{ApiError, AuthClient, NewsClient, SavedItemsClient};
use newsdesk_core::models::{
    Article, AuthToken, Credentials, NewsResponse, Registration, UserProfile,
};
use newsdesk_core::token::{MemoryTokenStore, TokenStore};

use super::*;
use crate::common::RequestTracker;
use crate::events::UiEvent;
use crate::session::AuthRequest;

struct StubAuth {
    accept: bool,
}

#[async_trait]
impl AuthClient for StubAuth {
    async fn authorize(&self, _credentials: &Credentials) -> Result<AuthToken, ApiError> {
        if self.accept {
            Ok(AuthToken {
                token: "issued".into(),
            })
        } else {
            Err(ApiError::Status {
                service: "auth",
                status: 401,
                message: "Incorrect email or password".into(),
            })
        }
    }

    async fn check_token(&self, token: &str) -> Result<UserProfile, ApiError> {
        if token == "issued" || token == "stored" {
            Ok(UserProfile {
                id: "u1".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
            })
        } else {
            Err(ApiError::Status {
                service: "auth",
                status: 401,
                message: String::new(),
            })
        }
    }

    async fn signup(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            id: "u2".into(),
            name: registration.name.clone(),
            email: registration.email.clone(),
        })
    }
}

struct StubNews {
    response: NewsResponse,
}

#[async_trait]
impl NewsClient for StubNews {
    async fn query(&self, _keyword: &str) -> Result<NewsResponse, ApiError> {
        Ok(self.response.clone())
    }
}

#[derive(Default)]
struct StubSaved {
    removed: Mutex<Vec<String>>,
}

#[async_trait]
impl SavedItemsClient for StubSaved {
    async fn list(&self, token: Option<&str>) -> Result<Vec<Article>, ApiError> {
        match token {
            Some(_) => Ok(vec![Article {
                title: "Kept".into(),
                ..Article::default()
            }]),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, _token: &str, article: &Article) -> Result<Article, ApiError> {
        let mut stored = article.clone();
        stored.id = Some("s1".into());
        Ok(stored)
    }

    async fn remove(&self, _token: &str, id: &str) -> Result<(), ApiError> {
        if let Ok(mut removed) = self.removed.lock() {
            removed.push(id.to_string());
        }
        Ok(())
    }
}

fn credentials() -> Credentials {
    Credentials {
        email: "ada@example.com".into(),
        password: "hunter22".into(),
    }
}

#[tokio::test]
async fn test_login_persists_token() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let event = authenticate(
        Arc::new(StubAuth { accept: true }),
        Arc::clone(&tokens) as Arc<dyn TokenStore>,
        AuthRequest::Login(credentials()),
    )
    .await;

    match event {
        UiEvent::AuthResult { result: Ok(session) } => {
            assert_eq!(session.token(), Some("issued"));
        }
        other => panic!("expected a session, got {other:?}"),
    }
    assert_eq!(tokens.get().unwrap().as_deref(), Some("issued"));
}

#[tokio::test]
async fn test_rejected_login_reports_backend_message() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let event = authenticate(
        Arc::new(StubAuth { accept: false }),
        Arc::clone(&tokens) as Arc<dyn TokenStore>,
        AuthRequest::Login(credentials()),
    )
    .await;

    assert!(matches!(
        event,
        UiEvent::AuthResult { result: Err(ref message) } if message == "Incorrect email or password"
    ));
    assert_eq!(tokens.writes(), 0);
}

#[tokio::test]
async fn test_register_signs_in() {
    let event = authenticate(
        Arc::new(StubAuth { accept: true }),
        Arc::new(MemoryTokenStore::new()),
        AuthRequest::Register(Registration {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            password: "longenough".into(),
        }),
    )
    .await;

    assert!(matches!(event, UiEvent::AuthResult { result: Ok(_) }));
}

#[tokio::test]
async fn test_validate_token_rejects_unknown() {
    let event = validate_token(Arc::new(StubAuth { accept: true }), "bogus".into()).await;
    assert!(matches!(event, UiEvent::SessionRestored { result: Err(_) }));
}

#[tokio::test]
async fn test_search_maps_missing_articles_to_none() {
    let request = RequestTracker::default().begin();
    let event = search(
        Arc::new(StubNews {
            response: NewsResponse {
                status: Some("ok".into()),
                total_results: Some(0),
                articles: Some(Vec::new()),
            },
        }),
        request,
        "climate".into(),
    )
    .await;

    assert!(matches!(
        event,
        UiEvent::SearchResult { result: Ok(None), ref keyword, .. } if keyword == "climate"
    ));
}

#[tokio::test]
async fn test_saved_handlers() {
    let saved = Arc::new(StubSaved::default());

    let loaded = load_saved(Arc::clone(&saved) as Arc<dyn SavedItemsClient>, Some("t".into())).await;
    assert!(matches!(loaded, UiEvent::SavedLoaded { result: Ok(ref items) } if items.len() == 1));

    let stored = save_article(
        Arc::clone(&saved) as Arc<dyn SavedItemsClient>,
        "t".into(),
        Article::default(),
    )
    .await;
    assert!(matches!(
        stored,
        UiEvent::BookmarkSaved { result: Ok(ref article) } if article.id.as_deref() == Some("s1")
    ));

    let removed = remove_article(
        Arc::clone(&saved) as Arc<dyn SavedItemsClient>,
        "t".into(),
        "s1".into(),
    )
    .await;
    assert!(matches!(removed, UiEvent::BookmarkRemoved { ref id, result: Ok(()) } if id == "s1"));
    assert_eq!(*saved.removed.lock().unwrap(), vec!["s1".to_string()]);
}

#[test]
fn test_clear_token_is_idempotent() {
    let tokens = MemoryTokenStore::with_token("stored");
    clear_token(&tokens);
    clear_token(&tokens);
    assert!(tokens.get().unwrap().is_none());
}
