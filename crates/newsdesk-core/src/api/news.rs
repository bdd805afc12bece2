//! News API client.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use url::Url;

use super::{ApiError, endpoint, read_json};
use crate::config::NewsConfig;
use crate::models::NewsResponse;

const SERVICE: &str = "news";

/// Keyword search against the news API.
#[async_trait]
pub trait NewsClient: Send + Sync {
    async fn query(&self, keyword: &str) -> Result<NewsResponse, ApiError>;
}

/// Client for the NewsAPI `everything` endpoint.
///
/// Searches a window of `lookback_days` ending today.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    page_size: u32,
    lookback_days: u32,
    language: Option<String>,
}

impl NewsApiClient {
    pub fn new(client: reqwest::Client, base_url: Url, config: &NewsConfig) -> Self {
        Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            page_size: config.page_size,
            lookback_days: config.lookback_days,
            language: config.language.clone(),
        }
    }

    /// Query parameters for a search ending on `today`.
    fn query_params(&self, keyword: &str, today: NaiveDate) -> Vec<(&'static str, String)> {
        let from = today
            .checked_sub_days(Days::new(u64::from(self.lookback_days)))
            .unwrap_or(today);
        let mut params = vec![
            ("q", keyword.to_string()),
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", today.format("%Y-%m-%d").to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            params.push(("language", language.to_string()));
        }
        params
    }
}

#[async_trait]
impl NewsClient for NewsApiClient {
    async fn query(&self, keyword: &str) -> Result<NewsResponse, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ApiError::NotConfigured("news.api_key"))?;
        let today = chrono::Local::now().date_naive();

        tracing::debug!(keyword, "querying news api");
        let response = self
            .client
            .get(endpoint(&self.base_url, "everything"))
            .header("X-Api-Key", api_key)
            .query(&self.query_params(keyword, today))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                service: SERVICE,
                source,
            })?;
        read_json(SERVICE, response).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::parse_base_url;

    fn client(server: &MockServer, api_key: Option<&str>) -> NewsApiClient {
        let config = NewsConfig {
            api_key: api_key.map(str::to_string),
            page_size: 20,
            ..NewsConfig::default()
        };
        NewsApiClient::new(
            reqwest::Client::new(),
            parse_base_url(&server.uri()).unwrap(),
            &config,
        )
    }

    #[test]
    fn test_query_params_window() {
        let config = NewsConfig {
            lookback_days: 7,
            language: Some("en".into()),
            ..NewsConfig::default()
        };
        let client = NewsApiClient::new(
            reqwest::Client::new(),
            parse_base_url("https://newsapi.org/v2").unwrap(),
            &config,
        );
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let params = client.query_params("climate", today);

        assert!(params.contains(&("q", "climate".to_string())));
        assert!(params.contains(&("from", "2024-02-27".to_string())));
        assert!(params.contains(&("to", "2024-03-05".to_string())));
        assert!(params.contains(&("pageSize", "100".to_string())));
        assert!(params.contains(&("language", "en".to_string())));
    }

    #[tokio::test]
    async fn test_query_sends_key_and_keyword() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(header("X-Api-Key", "key-1"))
            .and(query_param("q", "climate"))
            .and(query_param("pageSize", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [{"title": "Warming", "url": "https://example.com/w", "source": {"name": "Wire"}}]
            })))
            .mount(&server)
            .await;

        let response = client(&server, Some("key-1")).query("climate").await.unwrap();
        let articles = response.into_articles().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Warming");
    }

    #[tokio::test]
    async fn test_query_without_key_fails_locally() {
        let server = MockServer::start().await;
        let err = client(&server, None).query("climate").await.unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured("news.api_key")));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_query_maps_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "status": "error", "code": "rateLimited", "message": "Too many requests"
            })))
            .mount(&server)
            .await;

        let err = client(&server, Some("key-1")).query("climate").await.unwrap_err();
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.user_message(), "Too many requests");
    }
}
