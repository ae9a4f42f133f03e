use crate::bot::{CommandContext, ReplyTarget};
use serde::Deserialize;

/// Body of a LINE webhook request
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

impl WebhookPayload {
    /// Text message events as command contexts, in delivery order
    pub fn command_contexts(&self) -> Vec<CommandContext> {
        self.events
            .iter()
            .filter_map(WebhookEvent::command_context)
            .collect()
    }
}

/// One webhook event; only `message` events are acted on
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub reply_token: Option<String>,

    #[serde(default)]
    pub message: Option<MessageContent>,

    #[serde(default)]
    pub source: Option<EventSource>,
}

impl WebhookEvent {
    /// Returns the command context for a text message event
    ///
    /// A missing reply token becomes an empty target; the reply API rejects
    /// it and the dispatcher's fallback path deals with that.
    pub fn command_context(&self) -> Option<CommandContext> {
        if self.kind != "message" {
            return None;
        }

        match &self.message {
            Some(MessageContent::Text { text }) => Some(CommandContext::new(
                ReplyTarget::new(self.reply_token.clone().unwrap_or_default()),
                text.clone(),
            )),
            _ => None,
        }
    }
}

/// Message body of a `message` event
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Who sent the event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub group_id: Option<String>,
}
