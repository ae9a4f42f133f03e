//! Article records produced by the extractor

use url::Url;

/// A single article listing: a non-empty title and an absolute link
///
/// The link is kept as text so an absolute href from the page is reported
/// exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    title: String,
    url: String,
}

impl ArticleRecord {
    /// Builds a record, trimming both fields
    ///
    /// Returns `None` when the trimmed title is empty or the link is not an
    /// absolute http(s) URL.
    pub fn new(title: impl AsRef<str>, url: impl AsRef<str>) -> Option<Self> {
        let title = title.as_ref().trim();
        let url = url.as_ref().trim();
        if title.is_empty() || !is_web_url(url) {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            url: url.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn is_web_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

/// Article data that may be missing fields, as accepted by the formatter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialArticle {
    pub title: Option<String>,
    pub url: Option<String>,
}

impl From<&ArticleRecord> for PartialArticle {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            title: Some(record.title.clone()),
            url: Some(record.url.clone()),
        }
    }
}
