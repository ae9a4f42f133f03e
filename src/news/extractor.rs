//! Article extraction from listing pages
//!
//! The listing page marks every article title as an anchor inside an
//! `h2.archive__item-title` heading. When the page layout drifts the selector
//! simply stops matching, which surfaces as an empty article list rather
//! than an error.

use crate::config::SourceConfig;
use crate::news::ArticleRecord;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Failures inside extraction; never returned by [`extract_articles`]
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid article selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Where to look for article anchors and how to resolve their links
#[derive(Debug, Clone)]
pub struct ExtractorSettings {
    /// CSS selector matching article title anchors
    pub selector: String,

    /// Origin that relative hrefs are joined against
    pub base_origin: Url,
}

impl ExtractorSettings {
    pub fn new(selector: impl Into<String>, base_origin: Url) -> Self {
        Self {
            selector: selector.into(),
            base_origin,
        }
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, url::ParseError> {
        Ok(Self::new(
            config.article_selector.clone(),
            Url::parse(&config.base_origin)?,
        ))
    }
}

/// Extracts up to `max_articles` article records from a listing page
///
/// Never fails: any extraction problem is logged and yields an empty list.
///
/// # Rules
///
/// - Only the first `max_articles` matching anchors are considered, in
///   document order
/// - Anchors with blank text or a missing/blank `href` are skipped
/// - Relative hrefs are resolved against the base origin; absolute hrefs are
///   kept as they are
/// - Links that do not resolve to an http(s) URL are skipped
///
/// # Example
///
/// ```
/// use aivi_news_bot::news::{extract_articles, ExtractorSettings};
/// use url::Url;
///
/// let html = r#"<h2 class="archive__item-title"><a href="/llms/test">Test</a></h2>"#;
/// let settings = ExtractorSettings::new(
///     "h2.archive__item-title > a",
///     Url::parse("https://www.aivi.fyi").unwrap(),
/// );
/// let articles = extract_articles(html, &settings, 1);
/// assert_eq!(articles[0].url(), "https://www.aivi.fyi/llms/test");
/// ```
pub fn extract_articles(html: &str, settings: &ExtractorSettings, max_articles: usize) -> Vec<ArticleRecord> {
    match try_extract_articles(html, settings, max_articles) {
        Ok(articles) => articles,
        Err(e) => {
            tracing::error!(error = %e, "Article extraction failed, page layout may have changed");
            Vec::new()
        }
    }
}

/// Like [`extract_articles`] but reports extraction failures to the caller
pub fn try_extract_articles(
    html: &str,
    settings: &ExtractorSettings,
    max_articles: usize,
) -> Result<Vec<ArticleRecord>, ExtractError> {
    let selector =
        Selector::parse(&settings.selector).map_err(|e| ExtractError::InvalidSelector {
            selector: settings.selector.clone(),
            message: format!("{:?}", e),
        })?;

    let document = Html::parse_document(html);
    let mut anchors = document.select(&selector).peekable();

    if anchors.peek().is_none() {
        tracing::warn!(
            selector = %settings.selector,
            "No article links found, page layout may have changed"
        );
        return Ok(Vec::new());
    }

    let articles: Vec<ArticleRecord> = anchors
        .take(max_articles)
        .filter_map(|anchor| article_from_anchor(anchor, &settings.base_origin))
        .collect();

    tracing::info!(count = articles.len(), "Extracted articles");
    Ok(articles)
}

/// Builds a record from one anchor, or `None` if the entry is incomplete
fn article_from_anchor(anchor: ElementRef<'_>, base_origin: &Url) -> Option<ArticleRecord> {
    let text = anchor.text().collect::<String>();
    let title = text.trim();
    let href = anchor.value().attr("href").unwrap_or("").trim();

    if title.is_empty() || href.is_empty() {
        tracing::warn!(title, href, "Skipping incomplete article entry");
        return None;
    }

    let Some(url) = resolve_href(href, base_origin) else {
        tracing::warn!(title, href, "Skipping article with unusable link");
        return None;
    };

    ArticleRecord::new(title, url)
}

/// Resolves an href against the base origin
///
/// An href that already parses as an absolute URL is returned exactly as
/// written. Relative hrefs are joined onto the base origin. Returns None for
/// links that fail to parse or that use anything other than http or https.
pub fn resolve_href(href: &str, base_origin: &Url) -> Option<String> {
    let href = href.trim();
    let (resolved, text) = match Url::parse(href) {
        Ok(absolute) => (absolute, href.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let joined = base_origin.join(href).ok()?;
            let text = joined.to_string();
            (joined, text)
        }
        Err(_) => return None,
    };

    match resolved.scheme() {
        "http" | "https" => Some(text),
        _ => None,
    }
}
