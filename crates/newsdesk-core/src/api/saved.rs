//! Saved-articles client.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{ApiError, endpoint, read_body, read_json};
use crate::models::Article;

const SERVICE: &str = "saved articles";

/// The signed-in user's bookmarked articles.
#[async_trait]
pub trait SavedItemsClient: Send + Sync {
    /// Lists saved articles. The token is sent when one is available.
    async fn list(&self, token: Option<&str>) -> Result<Vec<Article>, ApiError>;

    /// Saves an article and returns the stored copy (with its id).
    async fn save(&self, token: &str, article: &Article) -> Result<Article, ApiError>;

    /// Removes a saved article by id.
    async fn remove(&self, token: &str, id: &str) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Wrapped { data: Vec<Article> },
    Raw(Vec<Article>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArticleEnvelope {
    Wrapped { data: Article },
    Raw(Article),
}

/// HTTP implementation: `GET/POST /articles`, `DELETE /articles/{id}`.
#[derive(Debug, Clone)]
pub struct HttpSavedItemsClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSavedItemsClient {
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }
}

fn transport(source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        service: SERVICE,
        source,
    }
}

#[async_trait]
impl SavedItemsClient for HttpSavedItemsClient {
    async fn list(&self, token: Option<&str>) -> Result<Vec<Article>, ApiError> {
        let mut request = self.client.get(endpoint(&self.base_url, "articles"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(transport)?;
        let envelope: ListEnvelope = read_json(SERVICE, response).await?;
        Ok(match envelope {
            ListEnvelope::Wrapped { data } | ListEnvelope::Raw(data) => data,
        })
    }

    async fn save(&self, token: &str, article: &Article) -> Result<Article, ApiError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "articles"))
            .bearer_auth(token)
            .json(article)
            .send()
            .await
            .map_err(transport)?;
        let envelope: ArticleEnvelope = read_json(SERVICE, response).await?;
        Ok(match envelope {
            ArticleEnvelope::Wrapped { data } | ArticleEnvelope::Raw(data) => data,
        })
    }

    async fn remove(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(endpoint(&self.base_url, &format!("articles/{id}")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        read_body(SERVICE, response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::parse_base_url;

    fn client(server: &MockServer) -> HttpSavedItemsClient {
        HttpSavedItemsClient::new(reqwest::Client::new(), parse_base_url(&server.uri()).unwrap())
    }

    #[tokio::test]
    async fn test_list_accepts_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "a1", "title": "One", "url": "https://example.com/1", "keyword": "rust"}
            ])))
            .mount(&server)
            .await;

        let saved = client(&server).list(None).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id.as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn test_list_accepts_wrapped_array_with_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        assert!(client(&server).list(Some("tok")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_returns_stored_copy() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"_id": "a9", "title": "Nine", "url": "https://example.com/9", "keyword": "rust"}
            })))
            .mount(&server)
            .await;

        let article = Article {
            title: "Nine".into(),
            url: "https://example.com/9".into(),
            keyword: "rust".into(),
            ..Article::default()
        };
        let stored = client(&server).save("tok", &article).await.unwrap();
        assert_eq!(stored.id.as_deref(), Some("a9"));
    }

    #[tokio::test]
    async fn test_remove_maps_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/articles/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Article not found"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).remove("tok", "missing").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
