//! `newsdesk search` against a mock news API.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_search_prints_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "climate"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": null, "name": "Daily Planet"},
                "title": "Glaciers in retreat",
                "url": "https://example.com/glaciers",
                "publishedAt": "2024-05-01T10:00:00Z"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    cargo_bin_cmd!("newsdesk")
        .env("NEWSDESK_HOME", dir.path())
        .env("NEWS_API_BASE_URL", server.uri())
        .env("NEWS_API_KEY", "test-key")
        .args(["search", "climate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Glaciers in retreat"))
        .stdout(predicate::str::contains("Daily Planet"))
        .stdout(predicate::str::contains("1 result(s) for \"climate\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_with_no_articles_says_nothing_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "totalResults": 0,
            "articles": []
        })))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    cargo_bin_cmd!("newsdesk")
        .env("NEWSDESK_HOME", dir.path())
        .env("NEWS_API_BASE_URL", server.uri())
        .env("NEWS_API_KEY", "test-key")
        .args(["search", "zzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing found"))
        .stdout(predicate::str::contains("nothing matched \"zzzz\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_reports_api_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    cargo_bin_cmd!("newsdesk")
        .env("NEWSDESK_HOME", dir.path())
        .env("NEWS_API_BASE_URL", server.uri())
        .env("NEWS_API_KEY", "test-key")
        .args(["search", "climate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("search news"));
}

#[test]
fn test_search_without_api_key_fails() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("newsdesk")
        .env("NEWSDESK_HOME", dir.path())
        .env_remove("NEWS_API_KEY")
        .args(["search", "climate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("news.api_key is not configured"));
}

#[test]
fn test_blank_keyword_is_rejected() {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("newsdesk")
        .env("NEWSDESK_HOME", dir.path())
        .args(["search", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a keyword"));
}
