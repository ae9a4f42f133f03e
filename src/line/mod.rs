//! LINE Messaging API boundary
//!
//! This module contains:
//! - The [`Replier`] seam the dispatcher sends replies through
//! - [`LineReplier`], the Messaging API implementation of it
//! - Webhook signature verification (`X-Line-Signature`)
//! - Serde types for webhook payloads

mod client;
mod signature;
mod webhook;

pub use client::LineReplier;
pub use signature::{compute_signature, verify_signature, SIGNATURE_HEADER};
pub use webhook::{EventSource, MessageContent, WebhookEvent, WebhookPayload};

use crate::bot::ReplyTarget;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while sending a reply
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reply rejected with HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Sends a text message to a reply target
///
/// Implementations make exactly one attempt; retry policy belongs to the
/// caller.
#[async_trait]
pub trait Replier: Send + Sync {
    async fn reply(&self, target: &ReplyTarget, text: &str) -> Result<(), ReplyError>;
}
