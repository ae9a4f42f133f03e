//! News retrieval: fetch the listing page, then extract articles

use crate::config::{Config, SourceConfig};
use crate::news::{
    build_http_client, extract_articles, fetch_page, ArticleRecord, ExtractorSettings, FetchPolicy,
};
use crate::BotError;
use async_trait::async_trait;
use reqwest::Client;

/// Anything that can supply the latest articles to the dispatcher
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns at most `max_articles` articles, newest first
    ///
    /// An empty list means "nothing found". `Err` is reserved for failures
    /// the source could not absorb itself.
    async fn latest_articles(&self, max_articles: usize) -> Result<Vec<ArticleRecord>, BotError>;
}

/// Fetches the homepage and extracts its article listings
#[derive(Debug, Clone)]
pub struct NewsRetrievalService {
    client: Client,
    homepage_url: String,
    policy: FetchPolicy,
    extractor: ExtractorSettings,
}

impl NewsRetrievalService {
    pub fn new(
        client: Client,
        homepage_url: impl Into<String>,
        policy: FetchPolicy,
        extractor: ExtractorSettings,
    ) -> Self {
        Self {
            client,
            homepage_url: homepage_url.into(),
            policy,
            extractor,
        }
    }

    /// Builds the service from configuration with its own HTTP client
    pub fn from_config(config: &Config) -> Result<Self, BotError> {
        let client = build_http_client(&config.user_agent)?;
        Self::with_client(client, &config.source)
    }

    /// Builds the service from source settings around an existing client
    pub fn with_client(client: Client, source: &SourceConfig) -> Result<Self, BotError> {
        Ok(Self::new(
            client,
            source.homepage_url.clone(),
            FetchPolicy::from_config(source),
            ExtractorSettings::from_config(source)?,
        ))
    }

    pub fn homepage_url(&self) -> &str {
        &self.homepage_url
    }

    /// Fetches and extracts up to `max_articles` articles
    ///
    /// Never fails: a failed fetch yields an empty list without attempting
    /// extraction.
    pub async fn retrieve(&self, max_articles: usize) -> Vec<ArticleRecord> {
        let html = match fetch_page(&self.client, &self.homepage_url, &self.policy).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %self.homepage_url, error = %e, "No articles: homepage fetch failed");
                return Vec::new();
            }
        };

        extract_articles(&html, &self.extractor, max_articles)
    }
}

#[async_trait]
impl NewsSource for NewsRetrievalService {
    async fn latest_articles(&self, max_articles: usize) -> Result<Vec<ArticleRecord>, BotError> {
        Ok(self.retrieve(max_articles).await)
    }
}
