use serde::Deserialize;

/// Main configuration structure for the bot
///
/// Every section is optional; a missing section or key falls back to the
/// production defaults for the AIVI deployment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bot: BotConfig,
    pub source: SourceConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub server: ServerConfig,
    pub line: LineConfig,
}

/// Command handling configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Literal command that triggers the news pipeline
    #[serde(rename = "trigger-command")]
    pub trigger_command: String,

    /// Maximum number of articles included in a reply
    #[serde(rename = "max-articles")]
    pub max_articles: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            trigger_command: "/aivi".to_string(),
            max_articles: 5,
        }
    }
}

/// Where and how article listings are fetched
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Page that lists the latest articles
    #[serde(rename = "homepage-url")]
    pub homepage_url: String,

    /// Origin used to resolve relative article links
    #[serde(rename = "base-origin")]
    pub base_origin: String,

    /// CSS selector matching article title anchors
    #[serde(rename = "article-selector")]
    pub article_selector: String,

    /// Per-attempt request timeout (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Extra attempts after a timed-out request
    #[serde(rename = "max-retries")]
    pub max_retries: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            homepage_url: "https://www.aivi.fyi/".to_string(),
            base_origin: "https://www.aivi.fyi".to_string(),
            article_selector: "h2.archive__item-title > a".to_string(),
            timeout_seconds: 5,
            max_retries: 2,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    #[serde(rename = "bot-name")]
    pub bot_name: String,

    #[serde(rename = "bot-version")]
    pub bot_version: String,

    /// URL with information about the bot
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            bot_name: "AiviNewsBot".to_string(),
            bot_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://www.aivi.fyi/".to_string(),
        }
    }
}

/// Webhook listener configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// LINE Messaging API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    #[serde(rename = "api-base")]
    pub api_base: String,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.line.me".to_string(),
        }
    }
}
