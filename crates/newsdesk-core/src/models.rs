//! Data model shared by the clients and the front-ends.

use serde::{Deserialize, Deserializer, Serialize};

/// Publisher information attached to an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A news article as returned by the news API or the saved-articles backend.
///
/// `keyword` is not part of the news API payload: it is stamped onto each
/// result when the search resolves so a later bookmark remembers which
/// search produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Server-side id, only present for saved articles.
    #[serde(
        default,
        rename = "_id",
        alias = "id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: ArticleSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword: String,
}

impl Article {
    /// Returns the article annotated with the search keyword that found it.
    #[must_use]
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        keyword.clone_into(&mut self.keyword);
        self
    }

    /// Display name of the publisher, if the API supplied one.
    pub fn source_name(&self) -> Option<&str> {
        self.source.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Publication date (`YYYY-MM-DD`) extracted from the RFC 3339 timestamp.
    pub fn published_date(&self) -> Option<String> {
        let raw = self.published_at.as_deref()?;
        chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.format("%B %-d, %Y").to_string())
            .ok()
            .or_else(|| raw.get(..10).map(str::to_string))
    }
}

/// Stamps every article with the keyword of the search that returned it.
pub fn stamp_keyword(articles: Vec<Article>, keyword: &str) -> Vec<Article> {
    articles
        .into_iter()
        .map(|article| article.with_keyword(keyword))
        .collect()
}

/// Response body of the news API `everything` endpoint.
///
/// `articles` may be missing entirely on some error-shaped 200 responses;
/// callers treat that the same as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
}

impl NewsResponse {
    /// Consumes the response, returning `None` when there is nothing to show.
    pub fn into_articles(self) -> Option<Vec<Article>> {
        self.articles.filter(|articles| !articles.is_empty())
    }
}

/// Profile of the signed-in user as reported by the auth backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
}

impl UserProfile {
    /// Name to greet the user with, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Sign-in request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// Credentials to sign in with once the account exists.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Sign-in response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

/// Distinct keywords of the saved articles, most frequent first.
///
/// Ties keep the order in which the keyword first appears.
pub fn saved_keywords(articles: &[Article]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for article in articles {
        let keyword = article.keyword.trim();
        if keyword.is_empty() {
            continue;
        }
        match counts
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(keyword))
        {
            Some((_, count)) => *count += 1,
            None => counts.push((keyword.to_string(), 1)),
        }
    }
    // Stable sort keeps first-appearance order between equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(keyword, _)| keyword).collect()
}

/// Human summary of saved keywords: "a, b, and 3 others".
pub fn keywords_summary(keywords: &[String]) -> String {
    match keywords {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{first} and {second}"),
        [first, second, third] => format!("{first}, {second}, and {third}"),
        [first, second, rest @ ..] => format!("{first}, {second}, and {} others", rest.len()),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn article(keyword: &str) -> Article {
        Article {
            title: format!("About {keyword}"),
            keyword: keyword.to_string(),
            ..Article::default()
        }
    }

    #[test]
    fn test_news_article_tolerates_nulls() {
        let value = json!({
            "source": { "id": null, "name": "Reuters" },
            "author": null,
            "title": null,
            "description": "desc",
            "url": "https://example.com/a",
            "urlToImage": null,
            "publishedAt": "2024-03-01T10:00:00Z",
            "content": null
        });
        let parsed: Article = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.source_name(), Some("Reuters"));
        assert_eq!(parsed.keyword, "");
        assert_eq!(parsed.published_date().as_deref(), Some("March 1, 2024"));
    }

    #[test]
    fn test_saved_article_reads_backend_id() {
        let value = json!({ "_id": "abc", "title": "t", "url": "u", "keyword": "rust" });
        let parsed: Article = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.id.as_deref(), Some("abc"));
        assert_eq!(parsed.keyword, "rust");
    }

    #[test]
    fn test_stamp_keyword_annotates_every_article() {
        let stamped = stamp_keyword(vec![Article::default(), Article::default()], "climate");
        assert!(stamped.iter().all(|a| a.keyword == "climate"));
    }

    #[test]
    fn test_news_response_absent_articles_is_empty() {
        let parsed: NewsResponse = serde_json::from_value(json!({ "status": "ok" })).unwrap();
        assert!(parsed.into_articles().is_none());

        let parsed: NewsResponse =
            serde_json::from_value(json!({ "status": "ok", "articles": [] })).unwrap();
        assert!(parsed.into_articles().is_none());
    }

    #[test]
    fn test_saved_keywords_orders_by_frequency() {
        let saved = vec![
            article("nature"),
            article("yellowstone"),
            article("yellowstone"),
            article("Nature"),
            article("parks"),
            article("nature"),
        ];
        assert_eq!(saved_keywords(&saved), vec!["nature", "yellowstone", "parks"]);
    }

    #[test]
    fn test_keywords_summary() {
        let kws = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        assert_eq!(keywords_summary(&kws(&[])), "");
        assert_eq!(keywords_summary(&kws(&["a"])), "a");
        assert_eq!(keywords_summary(&kws(&["a", "b"])), "a and b");
        assert_eq!(keywords_summary(&kws(&["a", "b", "c"])), "a, b, and c");
        assert_eq!(
            keywords_summary(&kws(&["a", "b", "c", "d", "e"])),
            "a, b, and 3 others"
        );
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = UserProfile {
            id: "1".into(),
            name: " ".into(),
            email: "ada@example.com".into(),
        };
        assert_eq!(user.display_name(), "ada@example.com");
    }
}
