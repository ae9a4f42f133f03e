//! Command dispatch and reply orchestration
//!
//! Per inbound message:
//!
//! ```text
//! Received → Ignored
//!          → Matched → Replied
//!                    → (pipeline failed) → FallbackReplied | FallbackFailed
//! ```
//!
//! Nothing escapes [`Dispatcher::handle`]; every failure, including a panic
//! inside the source, formatter or replier, ends in a logged
//! [`DispatchOutcome`].

use crate::bot::{CommandContext, TriggerCommand};
use crate::config::BotConfig;
use crate::line::Replier;
use crate::news::{format_news_message, NewsSource, FALLBACK_ERROR_MESSAGE};
use crate::BotError;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Final state of one inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Text was not the trigger command; nothing was sent
    Ignored,
    /// News reply delivered (possibly the "no articles" message)
    Replied { articles: usize },
    /// Pipeline failed; the error message was delivered instead
    FallbackReplied,
    /// Pipeline failed and the error message could not be delivered either
    FallbackFailed,
}

/// Matches the trigger command and runs retrieve → format → reply
#[derive(Clone)]
pub struct Dispatcher {
    trigger: TriggerCommand,
    max_articles: usize,
    source: Arc<dyn NewsSource>,
    replier: Arc<dyn Replier>,
}

impl Dispatcher {
    pub fn new(
        trigger: TriggerCommand,
        max_articles: usize,
        source: Arc<dyn NewsSource>,
        replier: Arc<dyn Replier>,
    ) -> Self {
        Self {
            trigger,
            max_articles,
            source,
            replier,
        }
    }

    pub fn from_config(
        config: &BotConfig,
        source: Arc<dyn NewsSource>,
        replier: Arc<dyn Replier>,
    ) -> Self {
        Self::new(
            TriggerCommand::new(&config.trigger_command),
            config.max_articles,
            source,
            replier,
        )
    }

    pub fn trigger(&self) -> &TriggerCommand {
        &self.trigger
    }

    /// Handles one inbound message
    pub async fn handle(&self, ctx: &CommandContext) -> DispatchOutcome {
        if !self.trigger.matches(&ctx.text) {
            tracing::debug!(text = %ctx.text, "Ignoring non-command message");
            return DispatchOutcome::Ignored;
        }

        tracing::info!(command = self.trigger.as_str(), "Handling command");

        // AssertUnwindSafe: the source and replier are shared trait objects
        let result = AssertUnwindSafe(self.reply_with_news(ctx))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(BotError::Panic(panic_message(&panic))));

        match result {
            Ok(articles) => {
                tracing::info!(articles, "Replied with news");
                DispatchOutcome::Replied { articles }
            }
            Err(e) => {
                tracing::error!(error = %e, "News reply failed, sending error message");
                self.reply_with_fallback(ctx).await
            }
        }
    }

    async fn reply_with_news(&self, ctx: &CommandContext) -> Result<usize, BotError> {
        let articles = self.source.latest_articles(self.max_articles).await?;
        tracing::info!(count = articles.len(), "Retrieved articles");

        let message = format_news_message(&articles);
        self.replier.reply(&ctx.reply_target, &message).await?;

        Ok(articles.len())
    }

    async fn reply_with_fallback(&self, ctx: &CommandContext) -> DispatchOutcome {
        let result = AssertUnwindSafe(self.replier.reply(&ctx.reply_target, FALLBACK_ERROR_MESSAGE))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(())) => {
                tracing::info!("Error message delivered");
                DispatchOutcome::FallbackReplied
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Failed to deliver error message");
                DispatchOutcome::FallbackFailed
            }
            Err(panic) => {
                tracing::error!(panic = %panic_message(&panic), "Replier panicked delivering error message");
                DispatchOutcome::FallbackFailed
            }
        }
    }
}

fn panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
