use std::sync::Arc;

use newsdesk_core::api::SavedItemsClient;
use newsdesk_core::models::Article;

use crate::events::UiEvent;

pub async fn load_saved(saved: Arc<dyn SavedItemsClient>, token: Option<String>) -> UiEvent {
    let result = saved
        .list(token.as_deref())
        .await
        .map_err(|err| err.to_string());
    UiEvent::SavedLoaded { result }
}

pub async fn save_article(
    saved: Arc<dyn SavedItemsClient>,
    token: String,
    article: Article,
) -> UiEvent {
    let result = saved
        .save(&token, &article)
        .await
        .map_err(|err| err.user_message());
    UiEvent::BookmarkSaved { result }
}

pub async fn remove_article(saved: Arc<dyn SavedItemsClient>, token: String, id: String) -> UiEvent {
    let result = saved
        .remove(&token, &id)
        .await
        .map_err(|err| err.user_message());
    UiEvent::BookmarkRemoved { id, result }
}
