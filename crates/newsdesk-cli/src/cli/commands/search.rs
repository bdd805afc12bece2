use anyhow::{Context, Result};
use newsdesk_core::models::stamp_keyword;
use newsdesk_core::services::Services;
use tracing::debug;

use super::article_table;

pub async fn run(services: &Services, keyword: &str) -> Result<()> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        anyhow::bail!("Please enter a keyword");
    }

    let response = services.news.query(keyword).await.context("search news")?;
    let Some(articles) = response.into_articles() else {
        println!("Nothing found");
        println!("Sorry, but nothing matched \"{keyword}\".");
        return Ok(());
    };
    debug!(count = articles.len(), "search resolved");

    let articles = stamp_keyword(articles, keyword);
    println!("{}", article_table(&articles, false));
    println!("{} result(s) for \"{keyword}\"", articles.len());
    Ok(())
}
