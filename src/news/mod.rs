//! News pipeline: fetching, extraction, retrieval, and formatting
//!
//! This module contains:
//! - HTTP fetching with a timeout-only retry policy
//! - Article extraction from the listing page
//! - The retrieval service combining both
//! - Reply text formatting

mod article;
mod extractor;
mod fetcher;
mod formatter;
mod service;

pub use article::{ArticleRecord, PartialArticle};
pub use extractor::{extract_articles, resolve_href, try_extract_articles, ExtractError, ExtractorSettings};
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchPolicy};
pub use formatter::{
    format_news_message, format_partial_articles, FALLBACK_ERROR_MESSAGE, MAX_FORMATTED_ARTICLES,
    NEWS_HEADER, NO_ARTICLES_MESSAGE, UNTITLED_PLACEHOLDER,
};
pub use service::{NewsRetrievalService, NewsSource};
