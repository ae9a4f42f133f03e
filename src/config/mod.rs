//! Configuration module for the AIVI news bot
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, plus reading LINE credentials from the environment.
//!
//! # Example
//!
//! ```no_run
//! use aivi_news_bot::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("bot.toml")).unwrap();
//! println!("Replying with up to {} articles", config.bot.max_articles);
//! ```

mod credentials;
mod parser;
mod types;
mod validation;

// Re-export types
pub use credentials::{LineCredentials, ACCESS_TOKEN_VAR, CHANNEL_SECRET_VAR};
pub use types::{BotConfig, Config, LineConfig, ServerConfig, SourceConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
