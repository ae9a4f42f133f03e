use crate::config::types::{
    BotConfig, Config, LineConfig, ServerConfig, SourceConfig, UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// A reply never lists more articles than the formatter renders
const MAX_ARTICLES_LIMIT: usize = crate::news::MAX_FORMATTED_ARTICLES;
const MAX_TIMEOUT_SECONDS: u64 = 60;
const MAX_RETRIES_LIMIT: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_bot_config(&config.bot)?;
    validate_source_config(&config.source)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_server_config(&config.server)?;
    validate_line_config(&config.line)?;
    Ok(())
}

/// Validates command handling configuration
fn validate_bot_config(config: &BotConfig) -> Result<(), ConfigError> {
    let trigger = config.trigger_command.trim();
    if trigger.is_empty() {
        return Err(ConfigError::Validation(
            "trigger_command cannot be empty".to_string(),
        ));
    }

    if trigger.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "trigger_command must be a single word, got '{}'",
            config.trigger_command
        )));
    }

    if config.max_articles < 1 || config.max_articles > MAX_ARTICLES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_articles must be between 1 and {}, got {}",
            MAX_ARTICLES_LIMIT, config.max_articles
        )));
    }

    Ok(())
}

/// Validates article source configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("homepage_url", &config.homepage_url)?;

    let origin = validate_http_url("base_origin", &config.base_origin)?;
    if origin.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_origin '{}' has no host",
            config.base_origin
        )));
    }

    if Selector::parse(&config.article_selector).is_err() {
        return Err(ConfigError::Validation(format!(
            "article_selector '{}' is not a valid CSS selector",
            config.article_selector
        )));
    }

    if config.timeout_seconds < 1 || config.timeout_seconds > MAX_TIMEOUT_SECONDS {
        return Err(ConfigError::Validation(format!(
            "timeout_seconds must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECONDS, config.timeout_seconds
        )));
    }

    if config.max_retries > MAX_RETRIES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= {}, got {}",
            MAX_RETRIES_LIMIT, config.max_retries
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate bot name: non-empty, alphanumeric + hyphens only
    if config.bot_name.is_empty() {
        return Err(ConfigError::Validation("bot_name cannot be empty".to_string()));
    }

    if !config
        .bot_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "bot_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.bot_name
        )));
    }

    if config.bot_version.is_empty() {
        return Err(ConfigError::Validation(
            "bot_version cannot be empty".to_string(),
        ));
    }

    validate_http_url("contact_url", &config.contact_url)?;

    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.host.is_empty() {
        return Err(ConfigError::Validation("host cannot be empty".to_string()));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation("port must be non-zero".to_string()));
    }

    Ok(())
}

fn validate_line_config(config: &LineConfig) -> Result<(), ConfigError> {
    validate_http_url("api_base", &config.api_base)?;
    Ok(())
}

/// Parses a URL and requires an http or https scheme
fn validate_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(url)
}
