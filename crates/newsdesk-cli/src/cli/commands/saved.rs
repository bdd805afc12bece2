use anyhow::{Context, Result};
use newsdesk_core::models::{keywords_summary, saved_keywords};
use newsdesk_core::services::Services;
use newsdesk_core::session;

use super::article_table;

pub async fn list(services: &Services) -> Result<()> {
    let session = session::restore(services.auth.as_ref(), services.tokens.as_ref()).await;
    let Some(user) = session.user() else {
        anyhow::bail!("Not signed in. Run `newsdesk login --email <EMAIL>` first.");
    };

    let articles = services
        .saved
        .list(session.token())
        .await
        .context("list saved articles")?;
    if articles.is_empty() {
        println!("{}, you have no saved articles.", user.display_name());
        return Ok(());
    }

    println!(
        "{}, you have {} saved article(s)",
        user.display_name(),
        articles.len()
    );
    let keywords = saved_keywords(&articles);
    if !keywords.is_empty() {
        println!("By keywords: {}", keywords_summary(&keywords));
    }
    println!("{}", article_table(&articles, true));
    Ok(())
}
