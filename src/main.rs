//! AIVI news bot entry point
//!
//! This is the command-line interface for running the LINE webhook server
//! and for checking the news pipeline by hand.

use aivi_news_bot::bot::Dispatcher;
use aivi_news_bot::config::{load_config_with_hash, Config, LineCredentials};
use aivi_news_bot::line::LineReplier;
use aivi_news_bot::news::{format_news_message, NewsRetrievalService};
use aivi_news_bot::server::{run_server, AppState};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// AIVI news bot: replies to `/aivi` with the latest AIVI articles
///
/// By default the bot serves the LINE webhook. LINE credentials are read
/// from LINE_CHANNEL_ACCESS_TOKEN and LINE_CHANNEL_SECRET (a `.env` file in
/// the working directory is honored).
#[derive(Parser, Debug)]
#[command(name = "aivi-news-bot")]
#[command(version)]
#[command(about = "LINE bot that replies with the latest AIVI articles", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the effective settings without serving
    #[arg(long, conflicts_with = "preview")]
    dry_run: bool,

    /// Fetch the news once and print the reply that would be sent
    #[arg(long, conflicts_with = "dry_run")]
    preview: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded environment from .env");
    }

    let config = load(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.preview {
        handle_preview(&config).await?;
    } else {
        handle_serve(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("aivi_news_bot=info,warn"),
            1 => EnvFilter::new("aivi_news_bot=debug,tower_http=debug,info"),
            2 => EnvFilter::new("aivi_news_bot=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the defaults when none was given
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let Some(path) = &cli.config else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(config: &Config) {
    println!("=== AIVI News Bot Dry Run ===\n");

    println!("Command:");
    println!("  Trigger: {}", config.bot.trigger_command);
    println!("  Max articles: {}", config.bot.max_articles);

    println!("\nSource:");
    println!("  Homepage: {}", config.source.homepage_url);
    println!("  Base origin: {}", config.source.base_origin);
    println!("  Selector: {}", config.source.article_selector);
    println!("  Timeout: {}s", config.source.timeout_seconds);
    println!(
        "  Attempts: {} (1 + {} retries on timeout)",
        config.source.max_retries + 1,
        config.source.max_retries
    );

    println!("\nServer:");
    println!("  Listen: {}:{}", config.server.host, config.server.port);
    println!("  LINE API: {}", config.line.api_base);

    println!("\n✓ Configuration is valid");
    match LineCredentials::from_env() {
        Ok(_) => println!("✓ LINE credentials found"),
        Err(e) => println!("✗ {}", e),
    }
}

/// Handles the --preview mode: runs retrieval and prints the reply text
async fn handle_preview(config: &Config) -> anyhow::Result<()> {
    let service = NewsRetrievalService::from_config(config)?;
    let articles = service.retrieve(config.bot.max_articles).await;
    tracing::info!(count = articles.len(), "Preview retrieved articles");

    println!("{}", format_news_message(&articles));
    Ok(())
}

/// Handles the default mode: serves the LINE webhook
async fn handle_serve(config: Config) -> anyhow::Result<()> {
    let credentials = LineCredentials::from_env().context("cannot serve without LINE credentials")?;

    let source = Arc::new(NewsRetrievalService::from_config(&config)?);
    let replier = Arc::new(LineReplier::new(
        &config.line.api_base,
        credentials.channel_access_token.clone(),
    )?);
    let dispatcher = Dispatcher::from_config(&config.bot, source, replier);

    tracing::info!(
        trigger = dispatcher.trigger().as_str(),
        homepage = %config.source.homepage_url,
        "Starting AIVI news bot"
    );

    let state = AppState::new(dispatcher, credentials.channel_secret.as_str());
    run_server(&config.server, state).await
}
