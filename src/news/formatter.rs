//! Reply text rendering

use crate::news::{ArticleRecord, PartialArticle};

/// First line of every news reply
pub const NEWS_HEADER: &str = "📰 AIVI Latest Articles";

/// Body used when no articles were found
pub const NO_ARTICLES_MESSAGE: &str = "No new articles found right now.";

/// Sent instead of the news reply when the pipeline fails
pub const FALLBACK_ERROR_MESSAGE: &str =
    "❌ Sorry, news is currently unavailable. Please retry later.";

/// Placeholder for an article without a title
pub const UNTITLED_PLACEHOLDER: &str = "(no title)";

/// Most entries a single reply will list
pub const MAX_FORMATTED_ARTICLES: usize = 5;

/// Renders articles as a LINE text message
///
/// ```text
/// 📰 AIVI Latest Articles
///
/// 1. First title
///    🔗 https://www.aivi.fyi/first
///
/// 2. Second title
///    🔗 https://www.aivi.fyi/second
/// ```
pub fn format_news_message(articles: &[ArticleRecord]) -> String {
    let entries: Vec<PartialArticle> = articles
        .iter()
        .take(MAX_FORMATTED_ARTICLES)
        .map(PartialArticle::from)
        .collect();
    format_partial_articles(&entries)
}

/// Same layout as [`format_news_message`], tolerating missing fields
pub fn format_partial_articles(articles: &[PartialArticle]) -> String {
    if articles.is_empty() {
        return format!("{}\n\n{}", NEWS_HEADER, NO_ARTICLES_MESSAGE);
    }

    let mut message = format!("{}\n\n", NEWS_HEADER);

    for (index, article) in articles.iter().take(MAX_FORMATTED_ARTICLES).enumerate() {
        let title = article.title.as_deref().unwrap_or(UNTITLED_PLACEHOLDER);
        let url = article.url.as_deref().unwrap_or("");
        message.push_str(&format!("{}. {}\n", index + 1, title));
        message.push_str(&format!("   🔗 {}\n\n", url));
    }

    message.trim_end().to_string()
}
