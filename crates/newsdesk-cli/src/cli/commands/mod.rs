//! Subcommand handlers.

pub mod auth;
pub mod config;
pub mod saved;
pub mod search;

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use newsdesk_core::models::Article;

/// Table of articles, one row each.
fn article_table(articles: &[Article], with_keyword: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Title", "Source", "Published", "URL"];
    if with_keyword {
        header.insert(0, "Keyword");
    }
    table.set_header(header);

    for article in articles {
        let mut row = vec![
            article.title.clone(),
            article.source_name().unwrap_or("-").to_string(),
            article.published_date().unwrap_or_else(|| "-".to_string()),
            article.url.clone(),
        ];
        if with_keyword {
            row.insert(0, article.keyword.clone());
        }
        table.add_row(row);
    }
    table
}
