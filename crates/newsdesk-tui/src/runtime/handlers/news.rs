use std::sync::Arc;

use newsdesk_core::api::NewsClient;
use newsdesk_core::models::NewsResponse;

use crate::common::RequestId;
use crate::events::UiEvent;

/// Queries the news API for `keyword`.
pub async fn search(news: Arc<dyn NewsClient>, request: RequestId, keyword: String) -> UiEvent {
    let result = news
        .query(&keyword)
        .await
        .map(NewsResponse::into_articles)
        .map_err(|err| err.user_message());
    UiEvent::SearchResult {
        request,
        keyword,
        result,
    }
}
