//! AIVI news bot: a LINE webhook bot that answers `/aivi`
//!
//! This crate fetches the AIVI homepage, extracts the latest article listings,
//! and replies to the requesting chat with a short formatted summary. Every
//! stage between the inbound event and the reply degrades instead of failing:
//! fetch and parse problems collapse to an empty article list, and reply
//! problems trigger a single fallback message.

pub mod bot;
pub mod config;
pub mod line;
pub mod news;
pub mod server;

use thiserror::Error;

/// Main error type for bot operations
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Reply error: {0}")]
    Reply(#[from] line::ReplyError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("News source failed: {0}")]
    Source(String),

    #[error("Pipeline panicked: {0}")]
    Panic(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(&'static str),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use bot::{CommandContext, DispatchOutcome, Dispatcher, ReplyTarget, TriggerCommand};
pub use config::Config;
pub use news::{format_news_message, ArticleRecord, NewsRetrievalService, NewsSource};
